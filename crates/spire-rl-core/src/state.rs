//! Outbound snapshot schema
//!
//! One `Snapshot` is an immutable point-in-time view of the run, serialized
//! as JSON and framed onto the wire. Sub-states are present only when the
//! matching screen is up; everything else is omitted from the document.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Derived classification of what the game is currently presenting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScreenType {
    Combat,
    Map,
    Shop,
    Rest,
    Reward,
    Event,
    GameOver,
    Victory,
    #[default]
    None,
}

/// Targeting mode of a card, as reported by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardTarget {
    Enemy,
    SelfAndEnemy,
    #[serde(rename = "SELF")]
    SelfOnly,
    AllEnemy,
    All,
    #[default]
    None,
}

impl CardTarget {
    /// True when playing the card needs a single living enemy picked
    pub fn requires_enemy(self) -> bool {
        matches!(self, CardTarget::Enemy | CardTarget::SelfAndEnemy)
    }
}

/// An active effect on the player or a monster
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PowerState {
    pub id: String,
    pub name: String,
    pub amount: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RelicState {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub counter: i32,
    /// Gold price; only present in shop listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrbState {
    pub id: String,
    pub name: String,
    pub evoke_amount: i32,
    pub passive_amount: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CardState {
    pub id: String,
    pub name: String,
    /// Effective cost; recomputed per turn for hand cards
    pub cost: i32,
    #[serde(rename = "type")]
    pub card_type: String,
    #[serde(default)]
    pub damage: i32,
    #[serde(default)]
    pub block: i32,
    #[serde(default)]
    pub target: CardTarget,
    #[serde(default)]
    pub is_upgraded: bool,
    #[serde(default)]
    pub magic_number: i32,
    #[serde(default)]
    pub exhaust: bool,
    /// Live playability, evaluated at snapshot time; hand cards only
    #[serde(default)]
    pub is_playable: bool,
    /// Gold price; only present in shop listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PotionState {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slot_index: i32,
    #[serde(default)]
    pub is_usable: bool,
    #[serde(default)]
    pub can_target: bool,
    /// Gold price; only present in shop listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlayerState {
    pub hp: i32,
    pub max_hp: i32,
    pub block: i32,
    pub energy: i32,
    pub gold: i32,
    pub floor: i32,
    #[serde(default)]
    pub stance: String,
    #[serde(default)]
    pub powers: Vec<PowerState>,
    #[serde(default)]
    pub relics: Vec<RelicState>,
    #[serde(default)]
    pub orbs: Vec<OrbState>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MonsterState {
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub block: i32,
    #[serde(default)]
    pub intent: String,
    /// Dead or escaping; not a valid card target
    #[serde(default)]
    pub is_gone: bool,
    #[serde(default)]
    pub powers: Vec<PowerState>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MapEdgeState {
    pub dst_x: i32,
    pub dst_y: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MapNodeState {
    pub x: i32,
    pub y: i32,
    pub room_type: String,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub children: Vec<MapEdgeState>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MapState {
    #[serde(default)]
    pub nodes: Vec<MapNodeState>,
    pub floor: i32,
    #[serde(default)]
    pub boss_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShopState {
    pub current_gold: i32,
    pub purge_cost: i32,
    #[serde(default)]
    pub cards: Vec<CardState>,
    #[serde(default)]
    pub relics: Vec<RelicState>,
    #[serde(default)]
    pub potions: Vec<PotionState>,
}

/// One claimable item on the combat-reward screen
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RewardItemState {
    /// Reward kind: GOLD, CARD, RELIC, POTION, ...
    #[serde(rename = "type")]
    pub reward_type: String,
    #[serde(default)]
    pub is_claimed: bool,
    /// Gold amount for GOLD rewards
    #[serde(default)]
    pub amount: i32,
    /// Relic/potion identifier, when applicable
    #[serde(default)]
    pub id: String,
    /// Card choices for CARD rewards
    #[serde(default)]
    pub cards: Vec<CardState>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RewardState {
    #[serde(default)]
    pub items: Vec<RewardItemState>,
}

/// One selectable campfire option, index-aligned with CHOOSE_REST_OPTION
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RestOptionState {
    /// Option kind: REST, SMITH, LIFT, TOKE, DIG, ...
    pub kind: String,
    #[serde(default)]
    pub usable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RestSiteState {
    pub heal_amount: i32,
    #[serde(default)]
    pub options: Vec<RestOptionState>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EventState {
    pub event_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameOutcome {
    pub is_done: bool,
    pub victory: bool,
    pub score: i32,
    #[serde(default)]
    pub ascension_level: i32,
}

/// One serialized view of simulation state sent to the peer
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Snapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerState>,
    #[serde(default)]
    pub monsters: Vec<MonsterState>,
    #[serde(default)]
    pub hand: Vec<CardState>,
    #[serde(default)]
    pub master_deck: Vec<CardState>,
    #[serde(default)]
    pub potions: Vec<PotionState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapState>,
    pub screen_type: ScreenType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop: Option<ShopState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<RewardState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_site: Option<RestSiteState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_outcome: Option<GameOutcome>,
}

impl Snapshot {
    /// Encode to a frame payload
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode from a frame payload
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
