//! Bridge context
//!
//! One `SpireBridge` is constructed at process start and handed to the
//! host's per-tick callback; it owns the connection slot, the command
//! queue, the sampling timer, and a small runtime for the network tasks.
//! The tick callback is the only place the bridge touches simulation
//! state, and nothing in it ever blocks on the network.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use spire_rl_core::Result;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::BridgeConfig;
use crate::connection::ConnectionManager;
use crate::dispatcher;
use crate::gate::{self, Stability};
use crate::host::GameHost;
use crate::queue::CommandQueue;
use crate::snapshot;

/// The bridge engine: connection lifecycle, inbound command queue,
/// per-tick gating, dispatch, and snapshot emission
pub struct SpireBridge {
    config: BridgeConfig,
    runtime: tokio::runtime::Runtime,
    connections: ConnectionManager,
    queue: Arc<CommandQueue>,
    last_sample: Option<Instant>,
}

impl SpireBridge {
    /// Build a bridge with the given configuration
    ///
    /// Spawns nothing yet; call [`start`](Self::start) to begin listening.
    pub fn new(config: BridgeConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("spire-bridge-net")
            .enable_all()
            .build()?;
        Ok(Self {
            config,
            runtime,
            connections: ConnectionManager::new(),
            queue: Arc::new(CommandQueue::new()),
            last_sample: None,
        })
    }

    /// Build a bridge from environment configuration
    pub fn from_env() -> Result<Self> {
        Self::new(BridgeConfig::from_env())
    }

    /// Bind the listener and spawn the accept loop; returns the bound address
    ///
    /// On bind failure (port already in use) the error is returned for the
    /// embedder to log and the bridge stays inert: `on_tick` still drains
    /// nothing and sends nothing, and the host keeps running.
    pub fn start(&mut self) -> Result<SocketAddr> {
        let listener = self
            .runtime
            .block_on(TcpListener::bind(("0.0.0.0", self.config.port)))?;
        let addr = listener.local_addr()?;
        info!(%addr, "bridge listening");

        let manager = self.connections.clone();
        let queue = Arc::clone(&self.queue);
        let max_frame_len = self.config.max_frame_len;
        self.runtime.spawn(async move {
            manager.accept_loop(listener, queue, max_frame_len).await;
        });
        Ok(addr)
    }

    /// Whether a peer is currently attached
    pub fn is_connected(&self) -> bool {
        self.connections.is_connected()
    }

    /// Per-tick callback, called from the host's own execution thread
    ///
    /// Gate evaluates once; while stable, at most one queued command is
    /// applied. A tick that mutated state never also samples: the
    /// quiescence the gate observed no longer holds, so the snapshot waits
    /// for a later stable tick.
    pub fn on_tick(&mut self, host: &mut dyn GameHost) {
        if gate::evaluate(host) == Stability::Unstable {
            return;
        }
        if dispatcher::dispatch_one(host, &self.queue).is_some() {
            return;
        }
        if !self.sample_due() {
            return;
        }
        let built = snapshot::build(host);
        // The cadence is wall-clock and independent of connectivity: the
        // timer advances even when the send is dropped for lack of a peer.
        self.last_sample = Some(Instant::now());
        match built.encode() {
            Ok(payload) => self.connections.send(payload),
            Err(e) => warn!("snapshot encode failed: {e}"),
        }
    }

    fn sample_due(&self) -> bool {
        match self.last_sample {
            None => true,
            Some(at) => at.elapsed() >= self.config.sample_interval,
        }
    }
}
