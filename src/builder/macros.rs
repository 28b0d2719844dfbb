//! Macros for writing tables as literals.

/// Build a `Vec<Transition>` from `from => via => to` triples.
///
/// Order is preserved, and with it first-match precedence.
///
/// # Example
///
/// ```
/// use palaxy_flow::transitions;
///
/// let table = transitions![
///     0 => "next" => 1,
///     1 => "back" => 0,
/// ];
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table[1].to, 0);
/// ```
#[macro_export]
macro_rules! transitions {
    ($($from:expr => $via:expr => $to:expr),* $(,)?) => {
        vec![$($crate::core::Transition::new($from, $via, $to)),*]
    };
}

/// Build a `Vec<(State, Value)>` from `state => value` pairs.
///
/// # Example
///
/// ```
/// use palaxy_flow::values;
///
/// let table = values![0 => "A", 1 => "B"];
///
/// assert_eq!(table, vec![(0, "A"), (1, "B")]);
/// ```
#[macro_export]
macro_rules! values {
    ($($state:expr => $value:expr),* $(,)?) => {
        vec![$(($state, $value)),*]
    };
}
