//! In-memory consumer registry.
//!
//! Fast, thread-safe storage for a single-process registration service.

use std::collections::HashSet;

use parking_lot::Mutex;
use tracing::{debug, instrument};

use relay_core::traits::ConsumerRegistry;
use relay_core::types::ConsumerIdentity;

/// In-memory consumer registry.
///
/// # Thread Safety
///
/// The set lives behind one mutex and is never handed out. Each operation
/// takes the lock exactly once, for the duration of the set operation only.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    /// Guarded by the mutex; no reference escapes it.
    consumers: Mutex<HashSet<ConsumerIdentity>>,
}

impl MemoryRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with preallocated capacity.
    ///
    /// Use this when you know the expected number of consumers.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            consumers: Mutex::new(HashSet::with_capacity(capacity)),
        }
    }
}

impl ConsumerRegistry for MemoryRegistry {
    fn exists(&self, consumer: &ConsumerIdentity) -> bool {
        self.consumers.lock().contains(consumer)
    }

    #[instrument(skip_all, fields(consumer = %consumer))]
    fn exists_and_add(&self, consumer: ConsumerIdentity) -> bool {
        // `insert` reports whether the value was new; one lock covers both halves.
        let inserted = self.consumers.lock().insert(consumer);
        debug!(inserted, "Registration attempt");
        !inserted
    }

    #[instrument(skip_all, fields(consumer = %consumer))]
    fn remove(&self, consumer: &ConsumerIdentity) {
        let removed = self.consumers.lock().remove(consumer);
        debug!(removed, "Deregistration");
    }

    fn reset(&self) {
        let mut consumers = self.consumers.lock();
        let cleared = consumers.len();
        consumers.clear();
        drop(consumers);

        debug!(cleared, "Registry reset");
    }

    fn consumers(&self) -> Vec<ConsumerIdentity> {
        let mut snapshot: Vec<_> = self.consumers.lock().iter().copied().collect();
        snapshot.sort();
        snapshot
    }

    fn len(&self) -> usize {
        self.consumers.lock().len()
    }
}
