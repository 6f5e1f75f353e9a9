//! # spire-rl-client
//!
//! Control-process side of the Spire-RL bridge: connects to the game
//! host's listener, receives framed snapshots, and sends fire-and-forget
//! commands. One connection, one consumer; the bridge replaces this peer
//! the moment another client connects.

use std::time::Duration;

use spire_rl_core::{frame, Command, Result, Snapshot};
use tokio::net::TcpStream;
use tracing::{debug, info};

/// Connection settings for the client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bridge host (default: 127.0.0.1)
    pub host: String,
    /// Bridge port (default: 9999)
    pub port: u16,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Maximum accepted inbound frame length in bytes
    pub max_frame_len: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 9999,
            connect_timeout: Duration::from_secs(30),
            max_frame_len: 64 * 1024 * 1024,
        }
    }
}

/// Client for one bridge connection
pub struct BridgeClient {
    stream: TcpStream,
    max_frame_len: usize,
}

impl BridgeClient {
    /// Connect with default settings to the given host and port
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        Self::connect_with(ClientConfig {
            host: host.into(),
            port,
            ..Default::default()
        })
        .await
    }

    /// Connect with explicit settings
    pub async fn connect_with(config: ClientConfig) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port);
        info!("connecting to bridge at {addr}");

        let stream = tokio::time::timeout(config.connect_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| {
                std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!("connection timeout to {addr}"),
                )
            })??;

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        Ok(Self {
            stream,
            max_frame_len: config.max_frame_len,
        })
    }

    /// Block until the next snapshot arrives
    pub async fn recv_snapshot(&mut self) -> Result<Snapshot> {
        let payload = frame::read_frame(&mut self.stream, self.max_frame_len).await?;
        debug!(len = payload.len(), "received snapshot frame");
        Snapshot::decode(&payload)
    }

    /// Send one command; fire-and-forget, no acknowledgement exists
    ///
    /// A rejected command is only observable through the next snapshot's
    /// unchanged state.
    pub async fn send_command(&mut self, command: &Command) -> Result<()> {
        let payload = command.encode()?;
        debug!(?command, "sending command");
        frame::write_frame(&mut self.stream, &payload).await
    }
}
