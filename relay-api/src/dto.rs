//! Wire bodies shared by the service and its client.

use relay_core::types::ConsumerIdentity;
use serde::{Deserialize, Serialize};

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    /// The consumer the request resolved to, for registry outcomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer: Option<ConsumerIdentity>,
}
