//! Domain types for RELAY.
//!
//! - [`ConsumerPort`]: Port number parsed from a request body
//! - [`ConsumerIdentity`]: The (address, port) pair a consumer registers under

mod consumer;

pub use consumer::*;
