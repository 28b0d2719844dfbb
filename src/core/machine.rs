//! Table-driven finite state machine.

use super::diagnostic::{Diagnostic, DiagnosticSender};
use super::history::{StepRecord, TransitionHistory};
use super::state::{Event, State};
use super::transition::{TransitionTable, ValueTable};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// What a single [`Fsm::step`] did
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<S, E> {
    /// Moved to `to` and took its mapped value
    Moved { from: S, to: S },

    /// Moved to `to`, which has no value mapping; previous value retained
    MovedKeepingValue { from: S, to: S },

    /// No entry leaves `from` via `via`; nothing changed
    Rejected { from: S, via: E },
}

impl<S, E> Outcome<S, E> {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Finite state machine over immutable transition and value tables.
///
/// The machine owns the current state (`index`) and the current value. Both
/// change only through [`Fsm::transition`] / [`Fsm::step`], which never fail:
/// an event that is not valid from the current state is a documented no-op.
///
/// Machines are normally created with [`crate::builder::FsmBuilder`], which
/// validates the tables first.
///
/// # Example
///
/// ```rust
/// use palaxy_flow::builder::FsmBuilder;
/// use palaxy_flow::{transitions, values};
///
/// let mut fsm = FsmBuilder::new()
///     .transitions(transitions![0 => "next" => 1, 1 => "back" => 0])
///     .values(values![0 => "A", 1 => "B"])
///     .build()
///     .unwrap();
///
/// assert_eq!(*fsm.transition("next"), "B");
/// assert_eq!(*fsm.transition("back"), "A");
/// assert_eq!(*fsm.transition("back"), "A");
/// assert_eq!(*fsm.index(), 0);
/// ```
pub struct Fsm<S: State, E: Event, V> {
    session: Uuid,
    index: S,
    value: V,
    transitions: Arc<TransitionTable<S, E>>,
    values: Arc<ValueTable<S, V>>,
    history: TransitionHistory<S, E>,
    diagnostics: Option<DiagnosticSender<S, E>>,
}

impl<S: State, E: Event, V: Clone> Fsm<S, E, V> {
    /// Assemble a machine from already validated parts.
    pub(crate) fn from_parts(
        index: S,
        value: V,
        transitions: Arc<TransitionTable<S, E>>,
        values: Arc<ValueTable<S, V>>,
        diagnostics: Option<DiagnosticSender<S, E>>,
    ) -> Self {
        let session = Uuid::new_v4();
        tracing::debug!(%session, state = ?index, "state machine created");
        Self {
            session,
            index,
            value,
            transitions,
            values,
            history: TransitionHistory::new(),
            diagnostics,
        }
    }

    /// Apply `via` and return the (possibly unchanged) current value.
    pub fn transition(&mut self, via: E) -> &V {
        self.step(via);
        &self.value
    }

    /// Apply `via` and report what happened.
    ///
    /// The first table entry leaving the current state via `via` wins. With
    /// no match, state and value are untouched and an
    /// [`Diagnostic::InvalidTransition`] is emitted. With a match whose target
    /// has no value mapping, the state moves, the previous value is kept and
    /// a [`Diagnostic::MissingValue`] is emitted.
    pub fn step(&mut self, via: E) -> Outcome<S, E> {
        let Some(target) = self.transitions.find(&self.index, &via).map(|t| t.to.clone()) else {
            tracing::warn!(
                session = %self.session,
                from = ?self.index,
                via = ?via,
                "invalid transition"
            );
            self.emit(Diagnostic::InvalidTransition {
                session: self.session,
                from: self.index.clone(),
                via: via.clone(),
            });
            return Outcome::Rejected {
                from: self.index.clone(),
                via,
            };
        };

        let from = std::mem::replace(&mut self.index, target);
        let to = self.index.clone();

        self.history.record(StepRecord {
            from: from.clone(),
            via,
            to: to.clone(),
            timestamp: Utc::now(),
        });

        match self.values.get(&to) {
            Some(value) => {
                self.value = value.clone();
                tracing::trace!(session = %self.session, ?from, ?to, "transitioned");
                Outcome::Moved { from, to }
            }
            None => {
                tracing::debug!(
                    session = %self.session,
                    state = ?to,
                    "no value mapped, keeping previous value"
                );
                self.emit(Diagnostic::MissingValue {
                    session: self.session,
                    state: to.clone(),
                });
                Outcome::MovedKeepingValue { from, to }
            }
        }
    }

    fn emit(&self, diagnostic: Diagnostic<S, E>) {
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.emit(diagnostic);
        }
    }
}

impl<S: State, E: Event, V> Fsm<S, E, V> {
    /// Current state
    pub fn index(&self) -> &S {
        &self.index
    }

    /// Current value
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Identifier of this machine instance, used to tag diagnostics
    pub fn session(&self) -> Uuid {
        self.session
    }

    /// Check if `via` would move the machine from its current state (pure)
    pub fn can(&self, via: &E) -> bool {
        self.transitions.find(&self.index, via).is_some()
    }

    /// Events accepted from the current state, in table order
    pub fn available_events(&self) -> Vec<&E> {
        self.transitions.events_from(&self.index)
    }

    pub fn history(&self) -> &TransitionHistory<S, E> {
        &self.history
    }

    pub fn transitions(&self) -> &TransitionTable<S, E> {
        &self.transitions
    }

    pub fn values(&self) -> &ValueTable<S, V> {
        &self.values
    }
}
