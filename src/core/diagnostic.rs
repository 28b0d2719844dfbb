//! Structured diagnostics emitted by the machine.
//!
//! Invalid transitions and unmapped target states are not errors. They are
//! reported here so that callers (and tests) can observe them without parsing
//! log output.

use super::state::{Event, State};
use crossbeam_channel::{bounded, Receiver, Sender};
use uuid::Uuid;

/// Something noteworthy happened during a transition
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic<S, E> {
    /// No table entry leaves `from` via `via`; state and value were kept
    InvalidTransition { session: Uuid, from: S, via: E },

    /// `state` was entered but has no value mapping; the previous value was kept
    MissingValue { session: Uuid, state: S },
}

impl<S, E> Diagnostic<S, E> {
    /// Session of the machine that produced this diagnostic
    pub fn session(&self) -> Uuid {
        match self {
            Self::InvalidTransition { session, .. } | Self::MissingValue { session, .. } => {
                *session
            }
        }
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }
}

/// Sending half of a diagnostics channel.
///
/// Sending never blocks and never fails: a dropped receiver just means nobody
/// is listening.
#[derive(Clone, Debug)]
pub struct DiagnosticSender<S, E> {
    sender: Sender<Diagnostic<S, E>>,
}

impl<S: State, E: Event> DiagnosticSender<S, E> {
    pub fn emit(&self, diagnostic: Diagnostic<S, E>) {
        let _ = self.sender.try_send(diagnostic);
    }
}

/// Diagnostics held before the receiver drains them.
pub const DIAGNOSTIC_CAPACITY: usize = 1024;

/// Create a bounded diagnostics channel.
///
/// Once [`DIAGNOSTIC_CAPACITY`] diagnostics are queued, further ones are
/// dropped until the receiver catches up. They still reach `tracing`.
pub fn channel<S: State, E: Event>() -> (DiagnosticSender<S, E>, Receiver<Diagnostic<S, E>>) {
    let (sender, receiver) = bounded(DIAGNOSTIC_CAPACITY);
    (DiagnosticSender { sender }, receiver)
}
