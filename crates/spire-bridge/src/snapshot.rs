//! Snapshot builder
//!
//! Assembles one immutable state message from live host state. Field
//! population is collaborator glue: the host hands over ready-made views
//! and the builder decides which sub-state belongs in the document based
//! on the derived screen classification.

use spire_rl_core::{GameOutcome, RewardState, ScreenType, Snapshot};

use crate::host::{GameHost, GameScreen, RoomPhase};

/// Derive the screen classification for the current tick
///
/// Terminal screens win over everything else: a death happens inside a
/// combat room, and the peer needs GAME_OVER, not COMBAT.
pub fn classify_screen(host: &dyn GameHost) -> ScreenType {
    match host.screen() {
        GameScreen::Death => return ScreenType::GameOver,
        GameScreen::Victory => return ScreenType::Victory,
        GameScreen::CombatReward => return ScreenType::Reward,
        GameScreen::Map => return ScreenType::Map,
        GameScreen::Shop => return ScreenType::Shop,
        GameScreen::None | GameScreen::Other => {}
    }
    if host.is_screen_up() && host.in_rest_room() {
        ScreenType::Rest
    } else if host.room_phase() == RoomPhase::Combat {
        ScreenType::Combat
    } else if host.in_event_room() {
        ScreenType::Event
    } else {
        ScreenType::None
    }
}

/// Build one snapshot of current simulation state
pub fn build(host: &dyn GameHost) -> Snapshot {
    let screen_type = classify_screen(host);
    let player = host.player();

    let mut snapshot = Snapshot {
        player: player.clone(),
        monsters: host.monsters(),
        hand: host.hand(),
        master_deck: host.master_deck(),
        potions: host.potions(),
        map: host.map(),
        screen_type,
        ..Default::default()
    };

    match screen_type {
        ScreenType::Reward => {
            snapshot.reward = Some(RewardState {
                items: host.rewards(),
            });
        }
        ScreenType::Shop => {
            snapshot.shop = host.shop();
        }
        ScreenType::Rest => {
            snapshot.rest_site = host.rest_site();
        }
        ScreenType::Event => {
            snapshot.event = host.event();
        }
        ScreenType::GameOver | ScreenType::Victory => {
            let floor = player.as_ref().map_or(0, |p| p.floor);
            snapshot.game_outcome = Some(GameOutcome {
                is_done: true,
                victory: screen_type == ScreenType::Victory,
                score: floor * 10,
                ascension_level: host.ascension_level(),
            });
        }
        ScreenType::Combat | ScreenType::Map | ScreenType::None => {}
    }

    snapshot
}
