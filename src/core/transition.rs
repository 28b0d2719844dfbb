//! Transition and value tables.

use super::state::{Event, State};
use serde::{Deserialize, Serialize};

/// One allowed move: being in `from` and receiving `via` leads to `to`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition<S, E> {
    pub from: S,
    pub via: E,
    pub to: S,
}

impl<S: State, E: Event> Transition<S, E> {
    pub fn new(from: S, via: E, to: S) -> Self {
        Self { from, via, to }
    }

    /// Check if this entry applies to `current` receiving `via` (pure)
    pub fn matches(&self, current: &S, via: &E) -> bool {
        self.from == *current && self.via == *via
    }
}

/// Ordered sequence of transitions, searched by first match.
///
/// Table order is precedence: when several entries share the same
/// `(from, via)` pair, the earliest one wins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionTable<S, E> {
    entries: Vec<Transition<S, E>>,
}

impl<S: State, E: Event> TransitionTable<S, E> {
    pub fn new(entries: Vec<Transition<S, E>>) -> Self {
        Self { entries }
    }

    /// First entry leaving `current` via `via`, if any.
    pub fn find(&self, current: &S, via: &E) -> Option<&Transition<S, E>> {
        self.entries.iter().find(|t| t.matches(current, via))
    }

    /// Source state of the first entry, the default initial state.
    pub fn first_state(&self) -> Option<&S> {
        self.entries.first().map(|t| &t.from)
    }

    /// Events accepted from `current`, in table order, without duplicates.
    pub fn events_from(&self, current: &S) -> Vec<&E> {
        let mut events: Vec<&E> = Vec::new();
        for entry in self.entries.iter().filter(|t| t.from == *current) {
            if !events.contains(&&entry.via) {
                events.push(&entry.via);
            }
        }
        events
    }

    pub fn entries(&self) -> &[Transition<S, E>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: State, E: Event> From<Vec<Transition<S, E>>> for TransitionTable<S, E> {
    fn from(entries: Vec<Transition<S, E>>) -> Self {
        Self::new(entries)
    }
}

impl<S: State, E: Event> FromIterator<Transition<S, E>> for TransitionTable<S, E> {
    fn from_iter<I: IntoIterator<Item = Transition<S, E>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Mapping from state to the payload shown while in that state.
///
/// Not required to be total. Lookup is first match so the table works for
/// states that are only `PartialEq`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueTable<S, V> {
    entries: Vec<(S, V)>,
}

impl<S: State, V> ValueTable<S, V> {
    pub fn new(entries: Vec<(S, V)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, state: &S) -> Option<&V> {
        self.entries
            .iter()
            .find(|(mapped, _)| mapped == state)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.get(state).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: State, V> Default for ValueTable<S, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<S: State, V> From<Vec<(S, V)>> for ValueTable<S, V> {
    fn from(entries: Vec<(S, V)>) -> Self {
        Self::new(entries)
    }
}

impl<S: State, V> FromIterator<(S, V)> for ValueTable<S, V> {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Start,
        Middle,
        End,
    }

    #[test]
    fn matches_requires_state_and_event() {
        let transition = Transition::new(TestState::Start, "next", TestState::Middle);

        assert!(transition.matches(&TestState::Start, &"next"));
        assert!(!transition.matches(&TestState::Start, &"back"));
        assert!(!transition.matches(&TestState::Middle, &"next"));
    }

    #[test]
    fn find_returns_first_match() {
        let table = TransitionTable::new(vec![
            Transition::new(TestState::Start, "next", TestState::Middle),
            Transition::new(TestState::Start, "next", TestState::End),
        ]);

        let found = table.find(&TestState::Start, &"next").unwrap();
        assert_eq!(found.to, TestState::Middle);
        assert!(table.find(&TestState::End, &"next").is_none());
    }

    #[test]
    fn first_state_is_first_source() {
        let table = TransitionTable::new(vec![
            Transition::new(TestState::Middle, "next", TestState::End),
            Transition::new(TestState::Start, "next", TestState::Middle),
        ]);

        assert_eq!(table.first_state(), Some(&TestState::Middle));

        let empty: TransitionTable<TestState, &str> = TransitionTable::new(Vec::new());
        assert_eq!(empty.first_state(), None);
        assert!(empty.is_empty());
    }

    #[test]
    fn events_from_lists_each_event_once() {
        let table: TransitionTable<_, _> = vec![
            Transition::new(TestState::Middle, "next", TestState::End),
            Transition::new(TestState::Middle, "back", TestState::Start),
            Transition::new(TestState::Middle, "next", TestState::Start),
            Transition::new(TestState::Start, "next", TestState::Middle),
        ]
        .into();

        assert_eq!(table.events_from(&TestState::Middle), vec![&"next", &"back"]);
        assert!(table.events_from(&TestState::End).is_empty());
    }

    #[test]
    fn value_table_is_partial() {
        let values: ValueTable<TestState, &str> =
            vec![(TestState::Start, "A"), (TestState::Middle, "B")]
                .into_iter()
                .collect();

        assert_eq!(values.get(&TestState::Start), Some(&"A"));
        assert_eq!(values.get(&TestState::Middle), Some(&"B"));
        assert_eq!(values.get(&TestState::End), None);
        assert!(!values.contains(&TestState::End));
        assert_eq!(values.len(), 2);
    }
}
