//! RELAY CLI
//!
//! Command-line interface for the RELAY consumer-registration service and its
//! UDP companions.

mod udp;

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tokio::net::UdpSocket;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use relay_api::{shutdown_signal, ApiConfig, ApiServer, RegistrationClient};
use relay_core::constants::{DEFAULT_SERVICE_PORT, DEFAULT_UDP_PORT};
use relay_core::types::ConsumerPort;

/// RELAY - UDP stream consumer registration
#[derive(Parser)]
#[command(name = "relay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the registration service
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "RELAY_PORT", default_value_t = DEFAULT_SERVICE_PORT)]
        port: u16,
        /// Bind address
        #[arg(short, long, env = "RELAY_BIND", default_value = "127.0.0.1")]
        bind: IpAddr,
    },

    /// Register this host's UDP port with the service
    Register {
        /// UDP port this host listens on
        #[arg(short, long)]
        port: u16,
        /// Registration service URL
        #[arg(long, env = "RELAY_SERVER", default_value = "http://127.0.0.1:8080")]
        server: String,
    },

    /// Check whether this host's UDP port is registered
    Status {
        /// UDP port this host listens on
        #[arg(short, long)]
        port: u16,
        /// Registration service URL
        #[arg(long, env = "RELAY_SERVER", default_value = "http://127.0.0.1:8080")]
        server: String,
    },

    /// Deregister this host's UDP port
    Deregister {
        /// UDP port this host listens on
        #[arg(short, long)]
        port: u16,
        /// Registration service URL
        #[arg(long, env = "RELAY_SERVER", default_value = "http://127.0.0.1:8080")]
        server: String,
    },

    /// Run a UDP echo server
    Echo {
        /// Port to listen for UDP packets on
        #[arg(short, long, default_value_t = DEFAULT_UDP_PORT)]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "127.0.0.1")]
        bind: IpAddr,
    },

    /// Send one UDP message and print the reply
    Send {
        /// Port to talk to
        #[arg(short, long, default_value_t = DEFAULT_UDP_PORT)]
        port: u16,
        /// Host to talk to
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        /// Message to send
        #[arg(short, long)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "relay=debug,info"
    } else {
        "relay=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(port, bind).await,
        Commands::Register { port, server } => cmd_register(port, &server).await,
        Commands::Status { port, server } => cmd_status(port, &server).await,
        Commands::Deregister { port, server } => cmd_deregister(port, &server).await,
        Commands::Echo { port, bind } => cmd_echo(port, bind).await,
        Commands::Send { port, host, message } => cmd_send(port, host, &message).await,
    }
}

/// Run the registration service
async fn cmd_serve(port: u16, bind: IpAddr) -> Result<()> {
    let config = ApiConfig::from_env().with_bind(bind).with_port(port);
    let server = ApiServer::new(config);

    let listener = server
        .bind()
        .await
        .with_context(|| format!("Failed to bind {}", server.config().socket_addr()))?;

    println!("{}", "🚀 Starting RELAY registration service...".cyan().bold());
    println!("   {} http://{}", "Listening on:".green(), listener.local_addr()?);
    println!("\n   Press Ctrl+C to stop.\n");

    server.serve(listener, shutdown_signal()).await?;

    Ok(())
}

/// Register a consumer port
async fn cmd_register(port: u16, server: &str) -> Result<()> {
    let client = RegistrationClient::new(server);

    client
        .register(ConsumerPort::from(port))
        .await
        .with_context(|| format!("Failed to register port {}", port))?;

    println!("{} port {} with {}", "✅ Registered".green(), port, server);
    Ok(())
}

/// Check a consumer port
async fn cmd_status(port: u16, server: &str) -> Result<()> {
    let client = RegistrationClient::new(server);

    let registered = client
        .status(ConsumerPort::from(port))
        .await
        .with_context(|| format!("Failed to query port {}", port))?;

    if registered {
        println!("{} port {} is registered", "✅".green(), port);
    } else {
        println!("{} port {} is not registered", "❌".yellow(), port);
    }
    Ok(())
}

/// Deregister a consumer port
async fn cmd_deregister(port: u16, server: &str) -> Result<()> {
    let client = RegistrationClient::new(server);

    client
        .deregister(ConsumerPort::from(port))
        .await
        .with_context(|| format!("Failed to deregister port {}", port))?;

    println!("{} port {} from {}", "✅ Deregistered".green(), port, server);
    Ok(())
}

/// Run the UDP echo server
async fn cmd_echo(port: u16, bind: IpAddr) -> Result<()> {
    let addr = SocketAddr::new(bind, port);
    let socket = UdpSocket::bind(addr)
        .await
        .with_context(|| format!("Failed to bind UDP {}", addr))?;

    println!("{} udp://{}", "📡 Echoing on".cyan().bold(), addr);
    println!("\n   Press Ctrl+C to stop.\n");

    tokio::select! {
        res = udp::echo_loop(socket) => res,
        _ = shutdown_signal() => Ok(()),
    }
}

/// Send a UDP message
async fn cmd_send(port: u16, host: IpAddr, message: &str) -> Result<()> {
    let reply = udp::send_message(SocketAddr::new(host, port), message).await?;
    println!("{}", reply);
    Ok(())
}
