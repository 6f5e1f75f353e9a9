//! Collaborator interface to the running game
//!
//! The bridge never touches simulation internals directly; everything it
//! reads or nudges goes through this trait, implemented by the host glue
//! and called only from the host's own tick thread. Shop listings,
//! rest-site options and reward items are accessor contracts the host must
//! expose as read-only views.

use spire_rl_core::{
    CardState, EventState, MapState, MonsterState, PlayerState, PotionState, RestSiteState,
    RewardItemState, ShopState,
};

/// Where the game's internal action pipeline currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionPhase {
    /// Idle, accepting player input
    #[default]
    WaitingOnUser,
    /// Resolving actions or animating
    Busy,
}

/// Phase of the current room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomPhase {
    Combat,
    Complete,
    Event,
    /// Transitioning or otherwise unsettled
    #[default]
    Incomplete,
}

/// Which modal screen the game is presenting, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameScreen {
    #[default]
    None,
    Map,
    Shop,
    CombatReward,
    Death,
    Victory,
    /// A modal screen the bridge does not recognize
    Other,
}

/// Read and narrow-write access to live simulation state
///
/// Mutations are confined to the game's own submission paths; the bridge
/// decides *when* to call them, the game decides what they do.
pub trait GameHost {
    // --- stability observations, read every tick ---

    fn action_phase(&self) -> ActionPhase;
    /// True while the game's low-level action queue is non-empty
    fn has_pending_actions(&self) -> bool;
    /// True from the moment an end-turn is requested until it resolves
    fn is_ending_turn(&self) -> bool;
    /// True once the current combat turn has already been ended
    fn turn_has_ended(&self) -> bool;
    fn room_phase(&self) -> RoomPhase;
    fn screen(&self) -> GameScreen;
    /// True while any modal screen is presented
    fn is_screen_up(&self) -> bool;
    fn in_rest_room(&self) -> bool;
    fn in_event_room(&self) -> bool;

    // --- snapshot reads ---

    /// Player vitals, active effects, relics and orbs; `None` before a run starts
    fn player(&self) -> Option<PlayerState>;
    /// Current hand, with effective cost and playability recomputed at call time
    fn hand(&self) -> Vec<CardState>;
    fn master_deck(&self) -> Vec<CardState>;
    fn monsters(&self) -> Vec<MonsterState>;
    fn potions(&self) -> Vec<PotionState>;
    fn map(&self) -> Option<MapState>;
    /// Shop listings with prices; `None` unless the shop screen is up
    fn shop(&self) -> Option<ShopState>;
    /// Campfire options; `None` outside a rest site
    fn rest_site(&self) -> Option<RestSiteState>;
    /// Identifier of the current event; `None` outside an event room
    fn event(&self) -> Option<EventState>;
    /// Items on the combat-reward screen; empty when it is not showing
    fn rewards(&self) -> Vec<RewardItemState>;
    fn ascension_level(&self) -> i32;

    // --- per-command validation queries ---

    /// Whether the hand card at `card_index` has sufficient energy right now
    fn card_has_energy(&self, card_index: usize) -> bool;
    /// The card's own playability check against an optional monster target
    fn card_playable(&self, card_index: usize, target: Option<usize>) -> bool;

    // --- mutations, called at most once per tick ---

    /// Mark the player as ending their turn and inject the end-turn event
    fn end_turn(&mut self);
    /// Submit the card-with-target to the game's action pipeline
    fn play_card(&mut self, card_index: usize, target: Option<usize>);
    /// Request a full game restart
    fn request_restart(&mut self);
    /// Claim the reward item at `index`, marking it claimed
    fn claim_reward(&mut self, index: usize);
    /// Close the reward screen without claiming the rest
    fn skip_rewards(&mut self);
    /// Set (x, y) as the next room, record the path, start the transition
    fn choose_map_node(&mut self, x: i32, y: i32);
    /// Simulate clicking the shop's cancel control
    fn leave_shop(&mut self);
    /// Trigger the campfire option at `index`
    fn choose_rest_option(&mut self, index: usize);
    /// Proceed out of the rest site
    fn leave_rest(&mut self);
}
