//! API route handlers.
//!
//! Every handler derives the consumer from the TCP peer's IP and the port in
//! the body. The body is fully read by the extractor before the handler runs,
//! so registry calls never overlap network I/O.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, Request, State},
    http::{Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, info};

use relay_core::error::RelayError;
use relay_core::types::{ConsumerIdentity, ConsumerPort};

use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

fn consumer_from(peer: SocketAddr, body: &[u8]) -> Result<ConsumerIdentity> {
    let port = ConsumerPort::parse(body).map_err(|e| {
        debug!(%peer, error = %e, "Rejected request body");
        ApiError::from(e)
    })?;
    Ok(ConsumerIdentity::from_peer(peer, port))
}

/// PUT /
pub async fn register(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> Result<StatusCode> {
    let consumer = consumer_from(peer, &body)?;

    if state.registry.exists_and_add(consumer) {
        debug!(%consumer, "Duplicate registration");
        return Err(RelayError::AlreadyRegistered(consumer).into());
    }

    info!(%consumer, "Consumer registered");
    Ok(StatusCode::OK)
}

/// GET /
pub async fn registration_status(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> Result<StatusCode> {
    let consumer = consumer_from(peer, &body)?;

    if state.registry.exists(&consumer) {
        Ok(StatusCode::OK)
    } else {
        Err(RelayError::NotRegistered(consumer).into())
    }
}

/// DELETE /
pub async fn deregister(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> Result<StatusCode> {
    let consumer = consumer_from(peer, &body)?;

    state.registry.remove(&consumer);

    info!(%consumer, "Consumer deregistered");
    Ok(StatusCode::OK)
}

/// Any verb other than PUT, GET or DELETE on `/`.
pub async fn unsupported_method(method: Method) -> ApiError {
    debug!(%method, "Unsupported method");
    RelayError::UnsupportedMethod(method.to_string()).into()
}

/// Any path other than `/`. The body is never read.
pub async fn unsupported_path(uri: Uri) -> ApiError {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |pq| pq.as_str())
        .to_string();
    debug!(%target, "Unsupported path");
    RelayError::UnsupportedPath(target).into()
}

/// Sends `/` with any query string to [`unsupported_path`].
///
/// The resource is the whole request target, so `/?x=1` is not `/`.
pub async fn reject_query(request: Request, next: Next) -> Response {
    if request.uri().query().is_some() {
        let uri = request.uri().clone();
        return unsupported_path(uri).await.into_response();
    }
    next.run(request).await
}
