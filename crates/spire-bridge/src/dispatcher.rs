//! Command dispatcher
//!
//! Drains the queue in FIFO order while the gate is stable and applies at
//! most one command per tick. Stopping at the first *applied* command is
//! deliberate: it keeps two mutations out of the same instant and forces a
//! fresh stability check before the next one. Commands that fail their
//! precondition are skipped silently; the protocol is fire-and-forget and
//! the peer infers failure from the next snapshot.

use spire_rl_core::Command;
use tracing::{debug, info};

use crate::host::{GameHost, GameScreen, RoomPhase};
use crate::queue::CommandQueue;

/// Drain the queue until one command mutates state; return that command
///
/// Inapplicable commands ahead of it are discarded, commands behind it stay
/// queued for the next stable tick.
pub fn dispatch_one(host: &mut dyn GameHost, queue: &CommandQueue) -> Option<Command> {
    while let Some(command) = queue.pop() {
        if apply(host, &command) {
            info!(?command, "applied command");
            return Some(command);
        }
        debug!(?command, "command skipped (precondition not met)");
    }
    None
}

/// Validate one command against live state and apply it if its
/// preconditions hold; true means state was mutated
fn apply(host: &mut dyn GameHost, command: &Command) -> bool {
    match command {
        Command::EndTurn => {
            if host.room_phase() != RoomPhase::Combat || host.turn_has_ended() {
                return false;
            }
            host.end_turn();
            true
        }

        Command::Reset => {
            host.request_restart();
            true
        }

        Command::PlayCard {
            card_index,
            target_index,
        } => play_card(host, *card_index, *target_index),

        Command::ChooseReward { target_index } => {
            if host.screen() != GameScreen::CombatReward {
                return false;
            }
            let index = match usize::try_from(*target_index) {
                Ok(i) => i,
                Err(_) => return false,
            };
            match host.rewards().get(index) {
                Some(item) if !item.is_claimed => {
                    host.claim_reward(index);
                    true
                }
                _ => false,
            }
        }

        Command::SkipReward => {
            if host.screen() != GameScreen::CombatReward {
                return false;
            }
            host.skip_rewards();
            true
        }

        Command::ChooseMapNode { x, y } => {
            if host.screen() != GameScreen::Map {
                return false;
            }
            let exists = host
                .map()
                .is_some_and(|map| map.nodes.iter().any(|n| n.x == *x && n.y == *y));
            if !exists {
                debug!(x, y, "map node not found");
                return false;
            }
            host.choose_map_node(*x, *y);
            true
        }

        Command::LeaveShop => {
            if host.screen() != GameScreen::Shop {
                return false;
            }
            host.leave_shop();
            true
        }

        Command::ChooseRestOption { target_index } => {
            if !host.in_rest_room() {
                return false;
            }
            let index = match usize::try_from(*target_index) {
                Ok(i) => i,
                Err(_) => return false,
            };
            let usable = host
                .rest_site()
                .is_some_and(|site| site.options.get(index).is_some_and(|o| o.usable));
            if !usable {
                return false;
            }
            host.choose_rest_option(index);
            true
        }

        Command::LeaveRest => {
            if host.screen() != GameScreen::None || !host.in_rest_room() {
                return false;
            }
            host.leave_rest();
            true
        }

        // Reserved shop variants: accepted by the protocol, not yet wired.
        Command::ChooseShopCard { .. }
        | Command::ChooseShopPotion { .. }
        | Command::ChooseShopRelic { .. }
        | Command::PurgeCard { .. } => {
            debug!(?command, "reserved command, ignored");
            false
        }

        // Never enqueued by ingestion; harmless if one slips through.
        Command::Unknown(_) => false,
    }
}

fn play_card(host: &mut dyn GameHost, card_index: i32, target_index: i32) -> bool {
    let index = match usize::try_from(card_index) {
        Ok(i) => i,
        Err(_) => return false,
    };
    let hand = host.hand();
    let card = match hand.get(index) {
        Some(card) => card,
        None => {
            debug!(card_index, "card index out of hand bounds");
            return false;
        }
    };

    let target = if card.target.requires_enemy() {
        match living_monster(host, target_index) {
            Some(t) => Some(t),
            None => {
                debug!(target_index, "no living monster at target index");
                return false;
            }
        }
    } else {
        // Non-targeted cards ignore target_index entirely.
        None
    };

    if !host.card_has_energy(index) {
        debug!(card = %card.id, "insufficient energy");
        return false;
    }
    if !host.card_playable(index, target) {
        debug!(card = %card.id, "card not playable");
        return false;
    }

    host.play_card(index, target);
    true
}

fn living_monster(host: &dyn GameHost, target_index: i32) -> Option<usize> {
    let index = usize::try_from(target_index).ok()?;
    let monsters = host.monsters();
    let monster = monsters.get(index)?;
    if monster.is_gone { None } else { Some(index) }
}
