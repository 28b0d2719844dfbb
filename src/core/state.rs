//! State and event traits for table-driven machines.
//!
//! A state is an opaque, comparable identifier for one step or mode of a
//! multi-step flow. An event is the input that may move the machine from one
//! state to another. Neither carries behavior of its own; everything the
//! machine knows about them lives in its tables.

use std::fmt::Debug;

/// Trait for machine states.
///
/// Implemented for every cloneable, comparable, debuggable type, so plain
/// ordinals work as well as enums.
///
/// # Example
///
/// ```rust
/// use palaxy_flow::core::State;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Step {
///     Pick,
///     Confirm,
/// }
///
/// fn assert_state<S: State>(_: &S) {}
///
/// assert_state(&Step::Pick);
/// assert_state(&3u8);
/// ```
pub trait State: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T> State for T where T: Clone + PartialEq + Debug + Send + Sync + 'static {}

/// Trait for machine events (the "via" of a transition).
///
/// Like [`State`], this is implemented for every type meeting the bounds.
/// `&'static str` events are common for wizards driven by button labels.
pub trait Event: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T> Event for T where T: Clone + PartialEq + Debug + Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum Step {
        Source,
        Options,
    }

    fn is_state<S: State>(_: &S) -> bool {
        true
    }

    fn is_event<E: Event>(_: &E) -> bool {
        true
    }

    #[test]
    fn plain_enums_qualify() {
        assert!(is_state(&Step::Source));
        assert!(is_event(&Step::Options));
    }

    #[test]
    fn ordinals_and_strings_qualify() {
        assert!(is_state(&0usize));
        assert!(is_state(&"tab"));
        assert!(is_event(&"next"));
        assert!(is_event(&String::from("back")));
    }
}
