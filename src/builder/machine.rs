//! Builder for constructing state machines.

use crate::builder::error::{BuildError, BuildErrors};
use crate::core::{DiagnosticSender, Event, Fsm, State, Transition, TransitionTable, ValueTable};
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing [`Fsm`] instances with a fluent API.
///
/// Tables may be handed over owned or already shared through an `Arc`, so
/// one externally supplied table can back many machine sessions.
pub struct FsmBuilder<S: State, E: Event, V> {
    transitions: Arc<TransitionTable<S, E>>,
    values: Arc<ValueTable<S, V>>,
    initial: Option<S>,
    diagnostics: Option<DiagnosticSender<S, E>>,
}

impl<S: State, E: Event, V: Clone> FsmBuilder<S, E, V> {
    /// Create a new builder with empty tables.
    pub fn new() -> Self {
        Self {
            transitions: Arc::new(TransitionTable::new(Vec::new())),
            values: Arc::new(ValueTable::default()),
            initial: None,
            diagnostics: None,
        }
    }

    /// Set the transition table (required, at least one entry).
    pub fn transitions(mut self, transitions: impl Into<TransitionTable<S, E>>) -> Self {
        self.transitions = Arc::new(transitions.into());
        self
    }

    /// Use a transition table shared with other machines.
    pub fn shared_transitions(mut self, transitions: Arc<TransitionTable<S, E>>) -> Self {
        self.transitions = transitions;
        self
    }

    /// Add a single transition at the end of the table.
    pub fn transition(mut self, from: S, via: E, to: S) -> Self {
        let mut entries = self.transitions.entries().to_vec();
        entries.push(Transition::new(from, via, to));
        self.transitions = Arc::new(TransitionTable::new(entries));
        self
    }

    /// Set the value table.
    pub fn values(mut self, values: impl Into<ValueTable<S, V>>) -> Self {
        self.values = Arc::new(values.into());
        self
    }

    /// Use a value table shared with other machines.
    pub fn shared_values(mut self, values: Arc<ValueTable<S, V>>) -> Self {
        self.values = values;
        self
    }

    /// Override the initial state (defaults to the first transition's source).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Report diagnostics on the given channel.
    pub fn diagnostics(mut self, sender: DiagnosticSender<S, E>) -> Self {
        self.diagnostics = Some(sender);
        self
    }

    /// Build the state machine.
    ///
    /// Validation accumulates every problem instead of stopping at the first
    /// one, so a misconfigured table is reported in a single pass.
    pub fn build(self) -> Result<Fsm<S, E, V>, BuildErrors> {
        let start = match self
            .initial
            .clone()
            .or_else(|| self.transitions.first_state().cloned())
        {
            Some(state) => match self.values.get(&state) {
                Some(value) => Validation::success((state, value.clone())),
                None => Validation::fail(BuildError::UnmappedInitialState {
                    state: format!("{state:?}"),
                }),
            },
            // No override and no first transition to start from.
            None => Validation::fail(BuildError::NoTransitions),
        };

        let table: Validation<(), NonEmptyVec<BuildError>> =
            if self.initial.is_some() && self.transitions.is_empty() {
                Validation::fail(BuildError::NoTransitions)
            } else {
                Validation::success(())
            };

        match table.and(start) {
            Validation::Success(((), (index, value))) => Ok(Fsm::from_parts(
                index,
                value,
                self.transitions,
                self.values,
                self.diagnostics,
            )),
            Validation::Failure(errors) => Err(BuildErrors(errors.into_iter().collect())),
        }
    }
}

impl<S: State, E: Event, V: Clone> Default for FsmBuilder<S, E, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diagnostic;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    #[test]
    fn builder_requires_transitions() {
        let result = FsmBuilder::<TestState, &str, u32>::new().build();

        let errors = result.err().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(&BuildError::NoTransitions));
    }

    #[test]
    fn builder_accumulates_all_errors() {
        let result = FsmBuilder::<TestState, &str, u32>::new()
            .initial(TestState::Complete)
            .values(vec![(TestState::Initial, 1)])
            .build();

        let errors = result.err().unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&BuildError::NoTransitions));
        assert!(errors.contains(&BuildError::UnmappedInitialState {
            state: "Complete".to_string()
        }));
    }

    #[test]
    fn mapped_override_on_empty_table_reports_missing_transitions_once() {
        let result = FsmBuilder::<TestState, &str, u32>::new()
            .initial(TestState::Initial)
            .values(vec![(TestState::Initial, 1)])
            .build();

        let errors = result.err().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(&BuildError::NoTransitions));
    }

    #[test]
    fn initial_state_defaults_to_first_source() {
        let fsm = FsmBuilder::new()
            .transition(TestState::Processing, "next", TestState::Complete)
            .transition(TestState::Initial, "next", TestState::Processing)
            .values(vec![(TestState::Processing, 2), (TestState::Initial, 1)])
            .build()
            .unwrap();

        assert_eq!(fsm.index(), &TestState::Processing);
        assert_eq!(*fsm.value(), 2);
    }

    #[test]
    fn initial_override_is_respected() {
        let fsm = FsmBuilder::new()
            .transition(TestState::Initial, "next", TestState::Processing)
            .values(vec![(TestState::Initial, 1), (TestState::Complete, 3)])
            .initial(TestState::Complete)
            .build()
            .unwrap();

        assert_eq!(fsm.index(), &TestState::Complete);
        assert_eq!(*fsm.value(), 3);
    }

    #[test]
    fn unmapped_default_initial_state_is_rejected() {
        let result = FsmBuilder::<TestState, &str, u32>::new()
            .transition(TestState::Initial, "next", TestState::Processing)
            .values(vec![(TestState::Processing, 2)])
            .build();

        let errors = result.err().unwrap();
        assert!(errors.contains(&BuildError::UnmappedInitialState {
            state: "Initial".to_string()
        }));
    }

    #[test]
    fn shared_tables_back_several_sessions() {
        let transitions = Arc::new(TransitionTable::new(vec![Transition::new(0u8, "next", 1u8)]));
        let values = Arc::new(ValueTable::new(vec![(0u8, "A"), (1u8, "B")]));

        let mut first = FsmBuilder::new()
            .shared_transitions(Arc::clone(&transitions))
            .shared_values(Arc::clone(&values))
            .build()
            .unwrap();
        let second = FsmBuilder::new()
            .shared_transitions(transitions)
            .shared_values(values)
            .build()
            .unwrap();

        first.transition("next");
        assert_eq!(*first.value(), "B");
        assert_eq!(*second.value(), "A");
    }

    #[test]
    fn diagnostics_are_wired_through() {
        let (tx, rx) = diagnostic::channel();
        let mut fsm = FsmBuilder::new()
            .transition(0u8, "next", 1u8)
            .values(vec![(0u8, "A")])
            .diagnostics(tx)
            .build()
            .unwrap();

        fsm.transition("back");
        fsm.transition("next");

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(received.len(), 2);
        assert!(received[0].is_invalid_transition());
        assert_eq!(*fsm.value(), "A");
    }
}
