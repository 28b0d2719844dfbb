//! Reactive store adapter around a state machine.
//!
//! [`FsmStore`] turns discrete transitions into a subscribable stream of
//! values. Screens subscribe to the value, and navigation calls
//! [`FsmStore::set`] or [`FsmStore::update`] with events.
//!
//! # Guarantees
//!
//! - `subscribe` calls the new callback once, right away, with the current
//!   value, so late subscribers never miss the state they arrive in.
//! - Every `set`/`update` call notifies each current subscriber exactly once,
//!   in subscription order, even when the event was rejected and the value is
//!   unchanged.
//! - Nothing here blocks on I/O or returns an error.

mod subscription;

pub use subscription::{Callback, SubscriberId, Subscription};

use crate::core::{Event, Fsm, Outcome, State};
use parking_lot::Mutex;
use std::sync::Arc;
use subscription::Subscribers;

/// Observable wrapper around one [`Fsm`] instance.
///
/// Clones share the same machine and subscriber list.
///
/// # Example
///
/// ```rust
/// use palaxy_flow::builder::from_tables;
/// use palaxy_flow::store::FsmStore;
/// use palaxy_flow::{transitions, values};
/// use std::sync::{Arc, Mutex};
///
/// let fsm = from_tables(
///     transitions![0 => "next" => 1, 1 => "back" => 0],
///     values![0 => "A", 1 => "B"],
/// )
/// .unwrap();
/// let store = FsmStore::new(fsm);
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let _subscription = store.subscribe(move |value: &&'static str| sink.lock().unwrap().push(*value));
///
/// store.set("next");
/// store.set("next");
///
/// assert_eq!(*seen.lock().unwrap(), vec!["A", "B", "B"]);
/// ```
pub struct FsmStore<S: State, E: Event, V> {
    fsm: Arc<Mutex<Fsm<S, E, V>>>,
    subscribers: Arc<Subscribers<V>>,
}

impl<S: State, E: Event, V: Clone> FsmStore<S, E, V> {
    pub fn new(fsm: Fsm<S, E, V>) -> Self {
        Self {
            fsm: Arc::new(Mutex::new(fsm)),
            subscribers: Arc::new(Subscribers::new()),
        }
    }

    /// Register `callback` and immediately call it with the current value.
    pub fn subscribe<F>(&self, callback: F) -> Subscription<V>
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        let callback: Callback<V> = Arc::new(callback);
        let id = self.subscribers.add(Arc::clone(&callback));

        let current = self.get();
        callback(&current);

        tracing::trace!(subscriber = ?id, "store subscriber added");
        Subscription::new(id, &self.subscribers)
    }

    /// Apply `event` and push the resulting value to every subscriber.
    pub fn set(&self, event: E) -> Outcome<S, E> {
        let (outcome, value) = {
            let mut fsm = self.fsm.lock();
            let outcome = fsm.step(event);
            (outcome, fsm.value().clone())
        };

        self.notify(&value);
        outcome
    }

    /// Derive the event from the current state, then behave like [`Self::set`].
    ///
    /// `derive` sees the state, not the value. It runs with the machine
    /// unlocked, so it may read or drive this store or any clone of it.
    pub fn update<F>(&self, derive: F) -> Outcome<S, E>
    where
        F: FnOnce(&S) -> E,
    {
        let state = self.state();
        let event = derive(&state);
        self.set(event)
    }

    /// Current value
    pub fn get(&self) -> V {
        self.fsm.lock().value().clone()
    }

    /// Current state
    pub fn state(&self) -> S {
        self.fsm.lock().index().clone()
    }

    /// Run `f` with read access to the wrapped machine.
    pub fn with_fsm<R>(&self, f: impl FnOnce(&Fsm<S, E, V>) -> R) -> R {
        f(&self.fsm.lock())
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&self, value: &V) {
        // Snapshot first so callbacks may subscribe or unsubscribe freely.
        let callbacks = self.subscribers.snapshot();
        tracing::trace!(subscribers = callbacks.len(), "notifying store subscribers");
        for callback in callbacks {
            callback(value);
        }
    }
}

impl<S: State, E: Event, V> Clone for FsmStore<S, E, V> {
    fn clone(&self) -> Self {
        Self {
            fsm: Arc::clone(&self.fsm),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}
