//! Error types for RELAY.
//!
//! Every request-level error is recoverable: it is reported to the caller as an
//! HTTP status and the service keeps serving. Registry operations themselves
//! never fail.

use thiserror::Error;

use crate::types::ConsumerIdentity;

/// Result type alias using `RelayError`.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Main error type for all RELAY operations.
#[derive(Debug, Error)]
pub enum RelayError {
    // ═══════════════════════════════════════════════════════════════════════════
    // ROUTING ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Request targeted a path other than `/`.
    #[error("Path {0} not supported")]
    UnsupportedPath(String),

    /// Request used a verb the service does not handle.
    #[error("Method {0} not supported")]
    UnsupportedMethod(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // INPUT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Body did not contain a decimal port.
    #[error("Port not provided in body: {0}")]
    InvalidPort(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // REGISTRY ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Consumer is already registered.
    #[error("Consumer {0} already exists")]
    AlreadyRegistered(ConsumerIdentity),

    /// Consumer is not registered.
    #[error("Consumer {0} not registered")]
    NotRegistered(ConsumerIdentity),

    // ═══════════════════════════════════════════════════════════════════════════
    // TRANSPORT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed or returned an unexpected status.
    #[error("HTTP request failed: {0}")]
    HttpError(String),
}
