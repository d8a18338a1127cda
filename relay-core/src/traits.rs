//! Common traits for RELAY.
//!
//! These traits define the interfaces that different implementations can satisfy,
//! enabling modularity and testing.

use crate::types::ConsumerIdentity;

// ═══════════════════════════════════════════════════════════════════════════════
// REGISTRY TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for the set of registered consumers.
///
/// Every operation is atomic with respect to every other: no interleaving of
/// two operations may be observed by a third. Operations are in-memory and
/// cannot fail, and implementations must never hold their exclusion across I/O.
pub trait ConsumerRegistry: Send + Sync {
    /// Returns true iff `consumer` is currently registered.
    fn exists(&self, consumer: &ConsumerIdentity) -> bool;

    /// Registers `consumer` unless it already is.
    ///
    /// Returns the prior membership: `true` means it was already present and
    /// nothing changed, `false` means it has just been inserted. The check and
    /// the insert are one step.
    fn exists_and_add(&self, consumer: ConsumerIdentity) -> bool;

    /// Removes `consumer` if present. Removing an absent consumer is a no-op.
    fn remove(&self, consumer: &ConsumerIdentity);

    /// Removes every registered consumer.
    fn reset(&self);

    /// Returns a snapshot of all registered consumers, sorted.
    fn consumers(&self) -> Vec<ConsumerIdentity>;

    /// Returns the number of registered consumers.
    fn len(&self) -> usize;

    /// Returns true if nothing is registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
