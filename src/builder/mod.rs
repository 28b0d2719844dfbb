//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder that validates transition and value
//! tables before a machine exists, plus macros for writing the tables as
//! literals.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::{BuildError, BuildErrors};
pub use machine::FsmBuilder;

use crate::core::{Event, Fsm, State};

/// Build a machine straight from literal tables, starting at the first
/// transition's source state.
///
/// # Example
///
/// ```
/// use palaxy_flow::builder::from_tables;
/// use palaxy_flow::{transitions, values};
///
/// let fsm = from_tables(
///     transitions![0 => "next" => 1],
///     values![0 => "A", 1 => "B"],
/// )
/// .unwrap();
///
/// assert_eq!(*fsm.value(), "A");
/// ```
pub fn from_tables<S, E, V>(
    transitions: Vec<crate::core::Transition<S, E>>,
    values: Vec<(S, V)>,
) -> Result<Fsm<S, E, V>, BuildErrors>
where
    S: State,
    E: Event,
    V: Clone,
{
    FsmBuilder::new()
        .transitions(transitions)
        .values(values)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tables_builds() {
        let fsm = from_tables(vec![crate::core::Transition::new(1u8, 'n', 2u8)], vec![(1u8, 10)])
            .unwrap();

        assert_eq!(fsm.index(), &1);
        assert_eq!(*fsm.value(), 10);
    }

    #[test]
    fn from_tables_reports_missing_transitions() {
        let result = from_tables::<u8, char, i32>(Vec::new(), vec![(1, 10)]);
        assert!(result.is_err());
    }
}
