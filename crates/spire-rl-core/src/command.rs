//! Inbound control commands
//!
//! The peer sends a flat envelope `{action_type, card_index, target_index}`;
//! the two indices are reused across variants with action-specific meaning
//! (map-node picks reuse them as X/Y). The envelope decodes into a closed
//! sum type with a default arm so an unrecognized discriminant is data, not
//! an error.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Wire form of a command, shared by both peers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEnvelope {
    pub action_type: String,
    #[serde(default)]
    pub card_index: i32,
    #[serde(default)]
    pub target_index: i32,
}

/// A decoded, typed instruction from the peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// End the current combat turn
    EndTurn,
    /// Request a full game restart
    Reset,
    /// Play the hand card at `card_index`, optionally against `target_index`
    PlayCard { card_index: i32, target_index: i32 },
    /// Claim the reward item at `target_index`
    ChooseReward { target_index: i32 },
    /// Close the reward screen without claiming
    SkipReward,
    /// Buy the shop card at `card_index` (reserved, not yet wired)
    ChooseShopCard { card_index: i32 },
    /// Buy the shop potion at `card_index` (reserved, not yet wired)
    ChooseShopPotion { card_index: i32 },
    /// Buy the shop relic at `card_index` (reserved, not yet wired)
    ChooseShopRelic { card_index: i32 },
    /// Pay to remove a deck card (reserved, not yet wired)
    PurgeCard { card_index: i32 },
    /// Dismiss the shop screen
    LeaveShop,
    /// Pick the rest-site option at `target_index`
    ChooseRestOption { target_index: i32 },
    /// Leave the rest site
    LeaveRest,
    /// Pick the map node at (x, y); reuses card_index/target_index as X/Y
    ChooseMapNode { x: i32, y: i32 },
    /// Discriminant not recognized; logged and dropped at ingestion
    Unknown(String),
}

impl Command {
    /// Decode a wire envelope into a typed command
    pub fn from_envelope(env: CommandEnvelope) -> Self {
        let CommandEnvelope {
            action_type,
            card_index,
            target_index,
        } = env;
        match action_type.as_str() {
            "END_TURN" => Command::EndTurn,
            "RESET" => Command::Reset,
            "PLAY_CARD" => Command::PlayCard {
                card_index,
                target_index,
            },
            "CHOOSE_REWARD" => Command::ChooseReward { target_index },
            "SKIP_REWARD" => Command::SkipReward,
            "CHOOSE_SHOP_CARD" => Command::ChooseShopCard { card_index },
            "CHOOSE_SHOP_POTION" => Command::ChooseShopPotion { card_index },
            "CHOOSE_SHOP_RELIC" => Command::ChooseShopRelic { card_index },
            "PURGE_CARD" => Command::PurgeCard { card_index },
            "LEAVE_SHOP" => Command::LeaveShop,
            "CHOOSE_REST_OPTION" => Command::ChooseRestOption { target_index },
            "LEAVE_REST" => Command::LeaveRest,
            "CHOOSE_MAP_NODE" => Command::ChooseMapNode {
                x: card_index,
                y: target_index,
            },
            _ => Command::Unknown(action_type),
        }
    }

    /// Encode back to the wire envelope (used by the client side)
    pub fn to_envelope(&self) -> CommandEnvelope {
        let (action_type, card_index, target_index) = match self {
            Command::EndTurn => ("END_TURN", 0, 0),
            Command::Reset => ("RESET", 0, 0),
            Command::PlayCard {
                card_index,
                target_index,
            } => ("PLAY_CARD", *card_index, *target_index),
            Command::ChooseReward { target_index } => ("CHOOSE_REWARD", 0, *target_index),
            Command::SkipReward => ("SKIP_REWARD", 0, 0),
            Command::ChooseShopCard { card_index } => ("CHOOSE_SHOP_CARD", *card_index, 0),
            Command::ChooseShopPotion { card_index } => ("CHOOSE_SHOP_POTION", *card_index, 0),
            Command::ChooseShopRelic { card_index } => ("CHOOSE_SHOP_RELIC", *card_index, 0),
            Command::PurgeCard { card_index } => ("PURGE_CARD", *card_index, 0),
            Command::LeaveShop => ("LEAVE_SHOP", 0, 0),
            Command::ChooseRestOption { target_index } => ("CHOOSE_REST_OPTION", 0, *target_index),
            Command::LeaveRest => ("LEAVE_REST", 0, 0),
            Command::ChooseMapNode { x, y } => ("CHOOSE_MAP_NODE", *x, *y),
            Command::Unknown(s) => (s.as_str(), 0, 0),
        };
        CommandEnvelope {
            action_type: action_type.to_string(),
            card_index,
            target_index,
        }
    }

    /// Decode a command from a frame payload
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let env: CommandEnvelope = serde_json::from_slice(bytes)?;
        Ok(Command::from_envelope(env))
    }

    /// Encode a command to a frame payload
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.to_envelope())?)
    }
}
