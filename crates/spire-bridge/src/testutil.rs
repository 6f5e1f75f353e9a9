//! Scripted `GameHost` used across unit tests

use spire_rl_core::{
    CardState, CardTarget, EventState, MapState, MonsterState, PlayerState, PotionState,
    RestSiteState, RewardItemState, ShopState,
};

use crate::host::{ActionPhase, GameHost, GameScreen, RoomPhase};

/// Hand card script: wire state plus the two dispatcher checks
#[derive(Debug, Clone)]
pub struct FakeCard {
    pub state: CardState,
    pub has_energy: bool,
    pub playable: bool,
}

impl FakeCard {
    pub fn strike() -> Self {
        Self {
            state: CardState {
                id: "Strike_R".into(),
                name: "Strike".into(),
                cost: 1,
                card_type: "ATTACK".into(),
                damage: 6,
                target: CardTarget::Enemy,
                is_playable: true,
                ..Default::default()
            },
            has_energy: true,
            playable: true,
        }
    }

    pub fn defend() -> Self {
        Self {
            state: CardState {
                id: "Defend_R".into(),
                name: "Defend".into(),
                cost: 1,
                card_type: "SKILL".into(),
                block: 5,
                target: CardTarget::SelfOnly,
                is_playable: true,
                ..Default::default()
            },
            has_energy: true,
            playable: true,
        }
    }
}

/// Fully scripted host; tests poke the public fields directly
#[derive(Debug, Default)]
pub struct FakeHost {
    pub action_phase: ActionPhase,
    pub has_pending_actions: bool,
    pub is_ending_turn: bool,
    pub turn_has_ended: bool,
    pub room_phase: RoomPhase,
    pub screen: GameScreen,
    pub is_screen_up: bool,
    pub in_rest_room: bool,
    pub in_event_room: bool,

    pub player: Option<PlayerState>,
    pub hand: Vec<FakeCard>,
    pub master_deck: Vec<CardState>,
    pub monsters: Vec<MonsterState>,
    pub potions: Vec<PotionState>,
    pub map: Option<MapState>,
    pub shop: Option<ShopState>,
    pub rest_site: Option<RestSiteState>,
    pub event: Option<EventState>,
    pub rewards: Vec<RewardItemState>,
    pub ascension_level: i32,

    // recorded mutations
    pub end_turns: u32,
    pub plays: Vec<(usize, Option<usize>)>,
    pub restarts: u32,
    pub claimed: Vec<usize>,
    pub reward_skips: u32,
    pub chosen_nodes: Vec<(i32, i32)>,
    pub shop_exits: u32,
    pub rest_options_taken: Vec<usize>,
    pub rest_exits: u32,
}

impl FakeHost {
    /// Quiescent combat: one living monster, Strike in hand
    pub fn in_combat() -> Self {
        Self {
            room_phase: RoomPhase::Combat,
            player: Some(PlayerState {
                hp: 70,
                max_hp: 80,
                energy: 3,
                gold: 120,
                floor: 3,
                ..Default::default()
            }),
            hand: vec![FakeCard::strike()],
            monsters: vec![MonsterState {
                id: "Cultist".into(),
                name: "Cultist".into(),
                hp: 48,
                max_hp: 48,
                intent: "ATTACK".into(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    /// Quiescent with the given modal screen up, room unsettled
    pub fn on_screen(screen: GameScreen) -> Self {
        Self {
            screen,
            is_screen_up: true,
            player: Some(PlayerState {
                hp: 70,
                max_hp: 80,
                floor: 5,
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

impl GameHost for FakeHost {
    fn action_phase(&self) -> ActionPhase {
        self.action_phase
    }

    fn has_pending_actions(&self) -> bool {
        self.has_pending_actions
    }

    fn is_ending_turn(&self) -> bool {
        self.is_ending_turn
    }

    fn turn_has_ended(&self) -> bool {
        self.turn_has_ended
    }

    fn room_phase(&self) -> RoomPhase {
        self.room_phase
    }

    fn screen(&self) -> GameScreen {
        self.screen
    }

    fn is_screen_up(&self) -> bool {
        self.is_screen_up
    }

    fn in_rest_room(&self) -> bool {
        self.in_rest_room
    }

    fn in_event_room(&self) -> bool {
        self.in_event_room
    }

    fn player(&self) -> Option<PlayerState> {
        self.player.clone()
    }

    fn hand(&self) -> Vec<CardState> {
        self.hand.iter().map(|c| c.state.clone()).collect()
    }

    fn master_deck(&self) -> Vec<CardState> {
        self.master_deck.clone()
    }

    fn monsters(&self) -> Vec<MonsterState> {
        self.monsters.clone()
    }

    fn potions(&self) -> Vec<PotionState> {
        self.potions.clone()
    }

    fn map(&self) -> Option<MapState> {
        self.map.clone()
    }

    fn shop(&self) -> Option<ShopState> {
        self.shop.clone()
    }

    fn rest_site(&self) -> Option<RestSiteState> {
        self.rest_site.clone()
    }

    fn event(&self) -> Option<EventState> {
        self.event.clone()
    }

    fn rewards(&self) -> Vec<RewardItemState> {
        self.rewards.clone()
    }

    fn ascension_level(&self) -> i32 {
        self.ascension_level
    }

    fn card_has_energy(&self, card_index: usize) -> bool {
        self.hand.get(card_index).is_some_and(|c| c.has_energy)
    }

    fn card_playable(&self, card_index: usize, _target: Option<usize>) -> bool {
        self.hand.get(card_index).is_some_and(|c| c.playable)
    }

    fn end_turn(&mut self) {
        self.end_turns += 1;
        self.turn_has_ended = true;
        self.is_ending_turn = true;
    }

    fn play_card(&mut self, card_index: usize, target: Option<usize>) {
        self.plays.push((card_index, target));
    }

    fn request_restart(&mut self) {
        self.restarts += 1;
    }

    fn claim_reward(&mut self, index: usize) {
        self.claimed.push(index);
        if let Some(item) = self.rewards.get_mut(index) {
            item.is_claimed = true;
        }
    }

    fn skip_rewards(&mut self) {
        self.reward_skips += 1;
        self.screen = GameScreen::None;
        self.is_screen_up = false;
    }

    fn choose_map_node(&mut self, x: i32, y: i32) {
        self.chosen_nodes.push((x, y));
        self.screen = GameScreen::None;
        self.is_screen_up = false;
    }

    fn leave_shop(&mut self) {
        self.shop_exits += 1;
        self.screen = GameScreen::None;
        self.is_screen_up = false;
    }

    fn choose_rest_option(&mut self, index: usize) {
        self.rest_options_taken.push(index);
    }

    fn leave_rest(&mut self) {
        self.rest_exits += 1;
    }
}
