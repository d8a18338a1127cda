//! Protocol constants for RELAY.

// ═══════════════════════════════════════════════════════════════════════════════
// HTTP CONTROL PLANE
// ═══════════════════════════════════════════════════════════════════════════════

/// The only resource path the registration service answers on.
pub const REGISTRATION_PATH: &str = "/";

/// Default TCP port of the registration service.
pub const DEFAULT_SERVICE_PORT: u16 = 8080;

/// Default bind host of the registration service.
pub const DEFAULT_SERVICE_HOST: &str = "127.0.0.1";

// ═══════════════════════════════════════════════════════════════════════════════
// UDP DATA PLANE
// ═══════════════════════════════════════════════════════════════════════════════

/// Default UDP port for the echo server and the bare client.
pub const DEFAULT_UDP_PORT: u16 = 8080;

/// Receive buffer size for UDP datagrams.
pub const UDP_BUFFER_SIZE: usize = 1024;

/// Prefix of every echo reply.
pub const ECHO_REPLY_PREFIX: &str = "Ack: ";
