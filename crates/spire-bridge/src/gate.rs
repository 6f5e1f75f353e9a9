//! Stability gate
//!
//! Evaluated once per tick; decides whether the game is quiescent enough to
//! dispatch a command or take a snapshot. Mutating state mid-animation or
//! mid-resolution corrupts the single-threaded host, so everything the
//! bridge does downstream is conditional on this answer. Pure function of
//! current state; no memory between ticks.

use crate::host::{ActionPhase, GameHost, GameScreen, RoomPhase};

/// Verdict for the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stability {
    Stable,
    Unstable,
}

/// Evaluate the gate against live state
///
/// Stable requires: the game waiting on user input, an empty internal
/// action queue, no turn-end in flight, and a settled surface, which is
/// either a room phase that idles (combat, complete, event) or a
/// recognized modal screen (map, shop, rest site, combat reward, or a
/// terminal death/victory screen).
pub fn evaluate(host: &dyn GameHost) -> Stability {
    if host.action_phase() != ActionPhase::WaitingOnUser {
        return Stability::Unstable;
    }
    if host.has_pending_actions() {
        return Stability::Unstable;
    }
    if host.is_ending_turn() {
        return Stability::Unstable;
    }

    let settled_room = matches!(
        host.room_phase(),
        RoomPhase::Combat | RoomPhase::Complete | RoomPhase::Event
    );
    let recognized_screen = host.is_screen_up()
        && (matches!(
            host.screen(),
            GameScreen::Map | GameScreen::Shop | GameScreen::CombatReward
                | GameScreen::Death
                | GameScreen::Victory
        ) || host.in_rest_room());

    if settled_room || recognized_screen {
        Stability::Stable
    } else {
        Stability::Unstable
    }
}
