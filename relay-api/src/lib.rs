//! # RELAY Registration Service
//!
//! HTTP control plane that lets remote processes opt in and out of a UDP
//! stream. A consumer is identified by the IP of its TCP connection plus the
//! port sent in the request body.
//!
//! ## Endpoints
//!
//! - `PUT /` - Register a consumer (`400` if already registered)
//! - `GET /` - Check registration (`200` registered, `404` not)
//! - `DELETE /` - Deregister a consumer
//!
//! Any other path or verb answers `404`; a body that is not a decimal port
//! answers `400`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use relay_api::{ApiServer, ApiConfig};
//!
//! let server = ApiServer::new(ApiConfig::default());
//! server.run().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use client::RegistrationClient;
pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use relay_core::traits::ConsumerRegistry;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Registration service.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new server with its own empty registry.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
        }
    }

    /// Creates a server around an existing registry.
    ///
    /// The registry is still reset when serving starts.
    pub fn with_registry(config: ApiConfig, registry: Arc<dyn ConsumerRegistry>) -> Self {
        Self {
            state: Arc::new(AppState::with_registry(config, registry)),
        }
    }

    /// Returns the server configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.state.config
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        create_router(self.state.clone()).layer(TraceLayer::new_for_http())
    }

    /// Binds the configured address.
    pub async fn bind(&self) -> std::io::Result<TcpListener> {
        TcpListener::bind(self.state.config.socket_addr()).await
    }

    /// Serves connections from `listener` until `shutdown` resolves.
    ///
    /// The registry is cleared before the first connection is accepted. On
    /// shutdown the listener stops accepting, in-flight requests run to
    /// completion, and the bound address is released before this returns.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        self.state.registry.reset();

        info!(%addr, "RELAY registration service listening");

        let app = self
            .router()
            .into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!(%addr, "RELAY registration service stopped");
        Ok(())
    }

    /// Binds the configured address and serves until Ctrl-C.
    pub async fn run(self) -> std::io::Result<()> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown_signal()).await
    }
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
