//! # RELAY Core
//!
//! Core types, errors, and traits for the RELAY consumer-registration service.
//!
//! This crate provides the foundational building blocks used by all other RELAY crates:
//!
//! - **Types**: Consumer identities and port parsing
//! - **Errors**: The request-level error taxonomy
//! - **Constants**: Protocol constants and defaults
//! - **Traits**: The [`ConsumerRegistry`] contract
//!
//! ## Example
//!
//! ```rust
//! use relay_core::{ConsumerIdentity, ConsumerPort};
//!
//! let port = ConsumerPort::parse(b"6714").unwrap();
//! let consumer = ConsumerIdentity::new("10.0.0.7".parse().unwrap(), port);
//! assert_eq!(consumer.to_string(), "10.0.0.7:6714");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{RelayError, Result};
pub use traits::*;
pub use types::*;
