//! Bare UDP plumbing: an echo server and a one-shot client.
//!
//! Neither touches the registry. They exist to exercise the data-plane
//! sockets that the registered consumers will eventually listen on.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::UdpSocket;

use relay_core::constants::{ECHO_REPLY_PREFIX, UDP_BUFFER_SIZE};

/// How long the client waits for an echo reply.
pub const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds the reply for one datagram: the prefix plus the trimmed payload.
pub fn echo_reply(payload: &[u8]) -> String {
    format!(
        "{}{}",
        ECHO_REPLY_PREFIX,
        String::from_utf8_lossy(payload).trim()
    )
}

/// Answers every datagram on `socket` with [`echo_reply`]. Runs until cancelled.
pub async fn echo_loop(socket: UdpSocket) -> Result<()> {
    let mut buf = vec![0u8; UDP_BUFFER_SIZE];

    tracing::info!(addr = %socket.local_addr()?, "UDP echo server listening");

    loop {
        let (len, peer) = match socket.recv_from(&mut buf).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "recv_from failed");
                continue;
            }
        };

        let reply = echo_reply(&buf[..len]);
        tracing::debug!(%peer, len, "echoing datagram");

        if let Err(e) = socket.send_to(reply.as_bytes(), peer).await {
            tracing::warn!(%peer, error = %e, "send_to failed");
        }
    }
}

/// Sends `message` plus a newline to `target` and waits for one reply.
pub async fn send_message(target: SocketAddr, message: &str) -> Result<String> {
    let local: SocketAddr = if target.is_ipv4() {
        ([0, 0, 0, 0], 0).into()
    } else {
        ([0u16; 8], 0).into()
    };

    let socket = UdpSocket::bind(local)
        .await
        .context("failed to bind UDP client socket")?;

    socket
        .send_to(format!("{}\n", message).as_bytes(), target)
        .await
        .with_context(|| format!("failed to send to {}", target))?;

    let mut buf = vec![0u8; UDP_BUFFER_SIZE];
    let len = tokio::time::timeout(REPLY_TIMEOUT, socket.recv(&mut buf))
        .await
        .with_context(|| format!("no reply from {} within {:?}", target, REPLY_TIMEOUT))?
        .context("failed to receive reply")?;

    Ok(String::from_utf8_lossy(&buf[..len]).into_owned())
}
