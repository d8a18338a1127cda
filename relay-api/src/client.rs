//! HTTP client for the registration service.
//!
//! The server keys every registration on the IP it sees the request come
//! from, so the client only ever sends the UDP port it listens on.

use reqwest::{Method, StatusCode};
use tracing::debug;

use relay_core::error::{RelayError, Result};
use relay_core::types::ConsumerPort;

use crate::dto::{ErrorBody, ErrorResponse};
use crate::error::ALREADY_REGISTERED;

/// Client for registering this host as a stream consumer.
#[derive(Clone, Debug)]
pub struct RegistrationClient {
    http: reqwest::Client,
    base_url: String,
}

impl RegistrationClient {
    /// Creates a client for the service at `base_url` (e.g. `http://127.0.0.1:8080`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing `reqwest` client.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { http, base_url }
    }

    /// Registers `port`.
    ///
    /// Fails with [`RelayError::AlreadyRegistered`] if the service already
    /// holds this host's registration for `port`.
    pub async fn register(&self, port: ConsumerPort) -> Result<()> {
        let (status, response) = self.send(Method::PUT, port).await?;
        if status == StatusCode::OK {
            return Ok(());
        }

        let body = response.json::<ErrorResponse>().await.ok();
        match body.map(|b| b.error) {
            Some(ErrorBody {
                code,
                consumer: Some(consumer),
                ..
            }) if status == StatusCode::BAD_REQUEST && code == ALREADY_REGISTERED => {
                Err(RelayError::AlreadyRegistered(consumer))
            }
            error => Err(Self::status_error(status, error)),
        }
    }

    /// Returns whether `port` is registered.
    pub async fn status(&self, port: ConsumerPort) -> Result<bool> {
        let (status, response) = self.send(Method::GET, port).await?;
        match status {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(Self::unexpected(status, response).await),
        }
    }

    /// Deregisters `port`. Succeeds even if it was never registered.
    pub async fn deregister(&self, port: ConsumerPort) -> Result<()> {
        let (status, response) = self.send(Method::DELETE, port).await?;
        match status {
            StatusCode::OK => Ok(()),
            _ => Err(Self::unexpected(status, response).await),
        }
    }

    async fn send(
        &self,
        method: Method,
        port: ConsumerPort,
    ) -> Result<(StatusCode, reqwest::Response)> {
        debug!(%method, %port, url = %self.base_url, "Sending registration request");

        let response = self
            .http
            .request(method, &self.base_url)
            .body(port.to_string())
            .send()
            .await
            .map_err(|e| RelayError::HttpError(e.to_string()))?;

        Ok((response.status(), response))
    }

    async fn unexpected(status: StatusCode, response: reqwest::Response) -> RelayError {
        let error = response.json::<ErrorResponse>().await.ok().map(|b| b.error);
        Self::status_error(status, error)
    }

    fn status_error(status: StatusCode, error: Option<ErrorBody>) -> RelayError {
        let detail = match error {
            Some(error) => error.message,
            None => status.canonical_reason().unwrap_or("unknown").to_string(),
        };
        RelayError::HttpError(format!("{}: {}", status.as_u16(), detail))
    }
}
