//! Collision-free identifiers for popups and other transient UI elements.

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out unique ids from a monotonically increasing counter.
///
/// Ids never repeat within one generator, so there is nothing to retry.
///
/// # Example
///
/// ```rust
/// use palaxy_flow::ident::IdGenerator;
///
/// let ids = IdGenerator::new("popup");
/// assert_eq!(ids.next_id(), "popup-1");
/// assert_eq!(ids.next_id(), "popup-2");
/// ```
#[derive(Debug)]
pub struct IdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }

    pub fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{n}", self.prefix)
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn ids_are_unique_across_threads() {
        let ids = Arc::new(IdGenerator::new("popup"));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..250).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }

        assert_eq!(seen.len(), 1000);
        assert_eq!(ids.issued(), 1000);
    }

    #[test]
    fn default_prefix() {
        assert_eq!(IdGenerator::default().next_id(), "id-1");
    }
}
