//! Build errors for state machines.

use thiserror::Error;

/// Problems found while validating a machine's tables.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Initial state {state} has no value mapping. Add it to the value table")]
    UnmappedInitialState { state: String },
}

/// Every problem found by a single [`crate::builder::FsmBuilder::build`] call.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{} build error(s): {}", .0.len(), render(.0))]
pub struct BuildErrors(pub Vec<BuildError>);

impl BuildErrors {
    pub fn iter(&self) -> impl Iterator<Item = &BuildError> {
        self.0.iter()
    }

    pub fn contains(&self, error: &BuildError) -> bool {
        self.0.contains(error)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn render(errors: &[BuildError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
