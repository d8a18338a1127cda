//! Consumer identity types.
//!
//! A consumer is identified by the IP address it is reachable at and the UDP
//! port it listens on. The address always comes from the TCP peer of the
//! registration request, never from the payload.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

use crate::error::{RelayError, Result};

/// Port number a consumer listens on.
///
/// Parsed from a body of ASCII decimal digits. The value is deliberately not
/// range checked against the UDP port space; see [`ConsumerPort::as_udp_port`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsumerPort(u64);

impl ConsumerPort {
    /// Wraps a raw port value.
    pub const fn new(port: u64) -> Self {
        Self(port)
    }

    /// Parses a request body into a port.
    ///
    /// The body must be non-empty and consist only of ASCII digits. No
    /// whitespace, sign, or trailing newline is tolerated.
    pub fn parse(body: &[u8]) -> Result<Self> {
        if body.is_empty() {
            return Err(RelayError::InvalidPort("empty body".into()));
        }

        if !body.iter().all(u8::is_ascii_digit) {
            return Err(RelayError::InvalidPort(format!(
                "expected decimal digits, got {:?}",
                String::from_utf8_lossy(body)
            )));
        }

        // All-digit input is valid UTF-8; only overflow can fail here.
        let digits = std::str::from_utf8(body)
            .map_err(|e| RelayError::InvalidPort(e.to_string()))?;
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| RelayError::InvalidPort(format!("{} is out of range", digits)))
    }

    /// Returns the raw value.
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Returns the value as a UDP port, if it fits.
    pub fn as_udp_port(&self) -> Option<u16> {
        u16::try_from(self.0).ok()
    }
}

impl fmt::Display for ConsumerPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for ConsumerPort {
    fn from(port: u16) -> Self {
        Self(u64::from(port))
    }
}

/// A registered stream recipient.
///
/// Two identities are equal iff both address and port match. Identities are
/// immutable once constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConsumerIdentity {
    addr: IpAddr,
    port: ConsumerPort,
}

impl ConsumerIdentity {
    /// Creates an identity.
    ///
    /// IPv4-mapped IPv6 addresses are collapsed to IPv4 so a host reaching a
    /// dual-stack listener gets the same identity as over plain IPv4.
    pub fn new(addr: IpAddr, port: ConsumerPort) -> Self {
        Self {
            addr: addr.to_canonical(),
            port,
        }
    }

    /// Creates the identity for a request arriving from `peer`.
    ///
    /// Only the peer's IP is used; its ephemeral TCP port is discarded.
    pub fn from_peer(peer: SocketAddr, port: ConsumerPort) -> Self {
        Self::new(peer.ip(), port)
    }

    /// Returns the consumer's address.
    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    /// Returns the consumer's port.
    pub fn port(&self) -> ConsumerPort {
        self.port
    }

    /// Returns the UDP destination for this consumer, if the port fits.
    pub fn udp_target(&self) -> Option<SocketAddr> {
        self.port
            .as_udp_port()
            .map(|port| SocketAddr::new(self.addr, port))
    }
}

impl fmt::Display for ConsumerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.addr {
            IpAddr::V4(ip) => write!(f, "{}:{}", ip, self.port),
            IpAddr::V6(ip) => write!(f, "[{}]:{}", ip, self.port),
        }
    }
}
