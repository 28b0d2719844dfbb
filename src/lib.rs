//! Palaxy Flow: wizard state machines and a notifying backend bridge
//!
//! The desktop front end keeps its real work in a backend process. What is
//! left on this side is navigation and feedback: which wizard step is showing,
//! and what the user is told when a backend command finishes. This crate
//! provides both, with no global state.
//!
//! # Core Concepts
//!
//! - **Fsm**: A table-driven state machine. Events not valid from the current
//!   state are no-ops reported as diagnostics, never errors
//! - **FsmStore**: Wraps one machine and pushes every resulting value to
//!   subscribers
//! - **Bridge**: Runs a backend command, publishes one notification about the
//!   outcome and returns the reply or `None`
//! - **NotificationChannel**: Single-slot, last-write-wins message holder
//! - **SettingsStore**: The one durable record, rewritten in full on change
//!
//! # Example
//!
//! ```rust
//! use palaxy_flow::builder::FsmBuilder;
//! use palaxy_flow::core::diagnostic;
//! use palaxy_flow::{transitions, values};
//!
//! let (tx, rx) = diagnostic::channel();
//! let mut fsm = FsmBuilder::new()
//!     .transitions(transitions![0 => "next" => 1, 1 => "back" => 0])
//!     .values(values![0 => "A", 1 => "B"])
//!     .diagnostics(tx)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(*fsm.transition("next"), "B");
//! assert_eq!(*fsm.transition("back"), "A");
//!
//! // Invalid from state 0: nothing changes, a diagnostic is emitted.
//! assert_eq!(*fsm.transition("back"), "A");
//! assert!(rx.try_recv().unwrap().is_invalid_transition());
//! ```

pub mod bridge;
pub mod builder;
pub mod context;
pub mod core;
pub mod ident;
pub mod notify;
pub mod settings;
pub mod store;
pub mod wizard;

// Re-export commonly used types
pub use bridge::{Bridge, Command, InvokeError, Invoker, Reply};
pub use builder::{BuildError, BuildErrors, FsmBuilder};
pub use context::AppContext;
pub use crate::core::{Diagnostic, Event, Fsm, Outcome, State, Transition};
pub use notify::{Notification, NotificationChannel, NotificationKind};
pub use settings::{Settings, SettingsStore};
pub use store::{FsmStore, Subscription};
