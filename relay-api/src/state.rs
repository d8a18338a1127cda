//! App state: registry, config.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use relay_core::constants::{DEFAULT_SERVICE_HOST, DEFAULT_SERVICE_PORT};
use relay_core::traits::ConsumerRegistry;
use relay_registry::MemoryRegistry;
use tracing::warn;

/// Registration service configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Address to bind the listener on.
    pub bind: IpAddr,
    /// TCP port to listen on. `0` picks an ephemeral port.
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: DEFAULT_SERVICE_PORT,
        }
    }
}

fn default_bind() -> IpAddr {
    DEFAULT_SERVICE_HOST
        .parse()
        .unwrap_or(IpAddr::from([127, 0, 0, 1]))
}

impl ApiConfig {
    /// Loads the config from `RELAY_BIND` and `RELAY_PORT`, reading `.env` first.
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self::from_vars(
            std::env::var("RELAY_BIND").ok().as_deref(),
            std::env::var("RELAY_PORT").ok().as_deref(),
        )
    }

    fn from_vars(bind: Option<&str>, port: Option<&str>) -> Self {
        let defaults = Self::default();

        let bind = match bind.map(str::parse::<IpAddr>) {
            Some(Ok(ip)) => ip,
            Some(Err(e)) => {
                warn!(error = %e, "Ignoring invalid RELAY_BIND");
                defaults.bind
            }
            None => defaults.bind,
        };

        let port = match port.map(str::parse::<u16>) {
            Some(Ok(port)) => port,
            Some(Err(e)) => {
                warn!(error = %e, "Ignoring invalid RELAY_PORT");
                defaults.port
            }
            None => defaults.port,
        };

        Self { bind, port }
    }

    /// Returns a copy listening on `port`.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Returns a copy bound to `bind`.
    pub fn with_bind(mut self, bind: IpAddr) -> Self {
        self.bind = bind;
        self
    }

    /// Returns the socket address to listen on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// State shared by every connection handler.
pub struct AppState {
    /// Listener configuration.
    pub config: ApiConfig,
    /// Registered consumers.
    pub registry: Arc<dyn ConsumerRegistry>,
}

impl AppState {
    /// Creates state backed by a fresh [`MemoryRegistry`].
    pub fn new(config: ApiConfig) -> Self {
        Self::with_registry(config, Arc::new(MemoryRegistry::new()))
    }

    /// Creates state around an existing registry.
    pub fn with_registry(config: ApiConfig, registry: Arc<dyn ConsumerRegistry>) -> Self {
        Self { config, registry }
    }
}
