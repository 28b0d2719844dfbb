//! Subscriber bookkeeping for [`super::FsmStore`].

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Callback invoked with the store's current value.
pub type Callback<V> = Arc<dyn Fn(&V) + Send + Sync>;

/// Subscriber ID for tracking subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

struct Subscriber<V> {
    id: SubscriberId,
    callback: Callback<V>,
}

/// Ordered list of subscribers, shared between a store and its handles.
pub(crate) struct Subscribers<V> {
    entries: RwLock<Vec<Subscriber<V>>>,
    next_id: AtomicU64,
}

impl<V> Subscribers<V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub(crate) fn add(&self, callback: Callback<V>) -> SubscriberId {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));

        self.entries.write().push(Subscriber { id, callback });
        id
    }

    pub(crate) fn remove(&self, id: SubscriberId) -> bool {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|s| s.id != id);
        entries.len() != before
    }

    /// Callbacks in subscription order, detached from the lock.
    pub(crate) fn snapshot(&self) -> Vec<Callback<V>> {
        self.entries
            .read()
            .iter()
            .map(|s| Arc::clone(&s.callback))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }
}

/// Handle returned by [`super::FsmStore::subscribe`].
///
/// Dropping the handle keeps the callback registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[must_use = "keep the handle to be able to unsubscribe"]
pub struct Subscription<V> {
    id: SubscriberId,
    subscribers: Weak<Subscribers<V>>,
}

impl<V> Subscription<V> {
    pub(crate) fn new(id: SubscriberId, subscribers: &Arc<Subscribers<V>>) -> Self {
        Self {
            id,
            subscribers: Arc::downgrade(subscribers),
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Remove the callback. Returns `false` if it was already gone or the
    /// store no longer exists.
    pub fn unsubscribe(&self) -> bool {
        match self.subscribers.upgrade() {
            Some(subscribers) => subscribers.remove(self.id),
            None => false,
        }
    }
}

impl<V> std::fmt::Debug for Subscription<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
