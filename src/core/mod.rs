//! Core state machine types and logic.
//!
//! This module contains the synchronous core of the wizard machinery:
//! - State and event marker traits
//! - Ordered transition tables and partial value tables
//! - The [`Fsm`] engine, which never fails and never performs I/O
//! - Structured diagnostics and a history of applied transitions

pub mod diagnostic;
mod history;
mod machine;
mod state;
mod transition;

pub use diagnostic::{Diagnostic, DiagnosticSender};
pub use history::{StepRecord, TransitionHistory};
pub use machine::{Fsm, Outcome};
pub use state::{Event, State};
pub use transition::{Transition, TransitionTable, ValueTable};
