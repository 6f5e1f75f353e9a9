//! # spire-bridge
//!
//! Real-time bridge between a continuously running, single-threaded game
//! host and one external control process. The bridge exports periodic
//! state snapshots over a framed TCP stream and injects a small vocabulary
//! of control commands back into the host's own tick, at the one moment
//! per tick the simulation is quiescent enough to touch.
//!
//! The host embeds a [`SpireBridge`], implements [`GameHost`] for its live
//! state, and calls [`SpireBridge::on_tick`] from its update loop. All
//! networking runs on background tasks; the tick thread never blocks.

pub mod bridge;
pub mod config;
pub mod connection;
pub mod dispatcher;
pub mod gate;
pub mod host;
pub mod queue;
pub mod snapshot;

#[cfg(test)]
mod testutil;

pub use bridge::SpireBridge;
pub use config::BridgeConfig;
pub use connection::ConnectionManager;
pub use gate::Stability;
pub use host::{ActionPhase, GameHost, GameScreen, RoomPhase};
pub use queue::CommandQueue;
