//! # spire-rl-core
//!
//! Shared protocol types for the Spire-RL bridge.
//!
//! Two message families flow in opposite directions over one framed TCP
//! stream: [`Command`] (peer -> bridge) and [`Snapshot`] (bridge -> peer).
//! This crate defines both, plus the error taxonomy shared by the engine
//! and client crates.

pub mod command;
pub mod error;
pub mod frame;
pub mod state;

pub use command::{Command, CommandEnvelope};
pub use error::{BridgeError, Result};
pub use state::{
    CardState, CardTarget, EventState, GameOutcome, MapEdgeState, MapNodeState, MapState,
    MonsterState, OrbState, PlayerState, PotionState, PowerState, RelicState, RestOptionState,
    RestSiteState, RewardItemState, RewardState, ScreenType, ShopState, Snapshot,
};
