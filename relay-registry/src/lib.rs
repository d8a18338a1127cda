//! # RELAY Registry
//!
//! Consumer registry storage for the RELAY registration service.
//!
//! [`MemoryRegistry`] keeps the registered consumers in a single mutex-guarded
//! set and only exposes the atomic operations of [`Registry`], so callers can
//! never race a check against an insert.
//!
//! ## Example
//!
//! ```rust
//! use relay_registry::{MemoryRegistry, Registry};
//! use relay_core::{ConsumerIdentity, ConsumerPort};
//!
//! let registry = MemoryRegistry::new();
//! let consumer = ConsumerIdentity::new("127.0.0.1".parse().unwrap(), ConsumerPort::new(6714));
//!
//! assert!(!registry.exists_and_add(consumer));
//! assert!(registry.exists_and_add(consumer));
//! assert!(registry.exists(&consumer));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod memory;

pub use memory::MemoryRegistry;

// Re-export the trait from core
pub use relay_core::traits::ConsumerRegistry as Registry;
