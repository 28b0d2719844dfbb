//! Record of applied transitions.
//!
//! Only transitions that moved the machine are recorded. Rejected events
//! leave no trace here; they surface as diagnostics instead.

use super::state::{Event, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single applied transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord<S, E> {
    /// The state being left
    pub from: S,
    /// The event that caused the move
    pub via: E,
    /// The state being entered
    pub to: S,
    /// When the move happened
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of applied transitions for one machine session.
///
/// # Example
///
/// ```rust
/// use palaxy_flow::core::{StepRecord, TransitionHistory};
/// use chrono::Utc;
///
/// let mut history = TransitionHistory::new();
/// history.record(StepRecord {
///     from: 0u8,
///     via: "next",
///     to: 1u8,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![&0u8, &1u8]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionHistory<S, E> {
    steps: Vec<StepRecord<S, E>>,
}

impl<S: State, E: Event> Default for TransitionHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> TransitionHistory<S, E> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn record(&mut self, step: StepRecord<S, E>) {
        self.steps.push(step);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the source of the first step followed by the target of each
    /// step, or an empty path when nothing was recorded.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.steps.len() + 1);
        if let Some(first) = self.steps.first() {
            path.push(&first.from);
        }
        for step in &self.steps {
            path.push(&step.to);
        }
        path
    }

    /// Elapsed time between the first and last recorded step.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.steps.first()?, self.steps.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn steps(&self) -> &[StepRecord<S, E>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Screen {
        Pick,
        Review,
        Export,
    }

    fn moved(from: Screen, to: Screen) -> StepRecord<Screen, &'static str> {
        StepRecord {
            from,
            via: "forward",
            to,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn empty_history_has_no_path_or_duration() {
        let history: TransitionHistory<Screen, &'static str> = TransitionHistory::default();

        assert_eq!(history.len(), 0);
        assert_eq!(history.get_path(), Vec::<&Screen>::new());
        assert_eq!(history.duration(), None);
    }

    #[test]
    fn path_starts_at_first_source() {
        let mut history = TransitionHistory::new();
        history.record(moved(Screen::Pick, Screen::Review));
        history.record(moved(Screen::Review, Screen::Export));

        assert_eq!(
            history.get_path(),
            vec![&Screen::Pick, &Screen::Review, &Screen::Export]
        );
    }

    #[test]
    fn duration_spans_first_to_last_step() {
        let mut history = TransitionHistory::new();
        history.record(moved(Screen::Pick, Screen::Review));
        std::thread::sleep(Duration::from_millis(10));
        history.record(moved(Screen::Review, Screen::Pick));

        let elapsed = history.duration().unwrap();
        assert!(elapsed >= Duration::from_millis(10));
    }

    #[test]
    fn one_step_takes_no_time() {
        let mut history = TransitionHistory::new();
        history.record(moved(Screen::Pick, Screen::Review));

        assert_eq!(history.duration(), Some(Duration::ZERO));
    }

    #[test]
    fn steps_survive_json() {
        let mut history: TransitionHistory<Screen, String> = TransitionHistory::new();
        history.record(StepRecord {
            from: Screen::Review,
            via: "back".to_string(),
            to: Screen::Pick,
            timestamp: Utc::now(),
        });

        let text = serde_json::to_string(&history).unwrap();
        let restored: TransitionHistory<Screen, String> = serde_json::from_str(&text).unwrap();

        assert_eq!(restored.steps(), history.steps());
    }
}
