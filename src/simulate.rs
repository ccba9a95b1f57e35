//! Headless bot play: the placement bot drives a seeded game through the
//! regular command path and the final snapshot is reported.

use crate::bot::{apply_placement, find_best_move, PlaceError, Placement};
use crate::core::{GameConfig, GameSnapshot, GameState};
use crate::types::{GameAction, TICK_MS};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    /// Pieces the bot put down.
    pub placed: u32,
    /// Placements that could not be steered into and were set directly.
    pub direct_placements: u32,
    pub snapshot: GameSnapshot,
}

/// Play up to `pieces` placements, stopping early at game over.
pub fn run(config: GameConfig, pieces: u32) -> SimulationReport {
    let mut state = GameState::new(config);
    state.start();

    let mut placed = 0;
    let mut direct_placements = 0;
    while placed < pieces && !state.game_over() {
        // Let staged resolves play out.
        while state.is_resolving() {
            state.tick(TICK_MS);
        }
        let Some(active) = state.active() else {
            break;
        };
        let Some(placement) = find_best_move(state.board(), &active) else {
            info!(
                target: "simulate",
                "no placement for {} after {placed} pieces",
                active.kind.as_str()
            );
            break;
        };

        match steer(&mut state, &placement) {
            Ok(()) => {}
            Err(err) => {
                debug!(target: "simulate", "steering failed ({}); placing directly", err.code());
                if let Err(err) = apply_placement(&mut state, &placement) {
                    warn!(target: "simulate", "placement rejected: {err}");
                    break;
                }
                direct_placements += 1;
            }
        }
        placed += 1;
        state.drain_events().for_each(drop);
    }
    while state.is_resolving() {
        state.tick(TICK_MS);
    }

    let snapshot = state.snapshot();
    info!(
        target: "simulate",
        "finished placed={placed} score={} lines={} level={} game_over={}",
        snapshot.score,
        snapshot.lines,
        snapshot.level,
        snapshot.game_over
    );
    SimulationReport {
        placed,
        direct_placements,
        snapshot,
    }
}

/// Reach `placement` with rotate and move commands, then hard drop.
///
/// Leaves the piece where the commands got it when it fails; nothing is locked.
pub fn steer(state: &mut GameState, placement: &Placement) -> Result<(), PlaceError> {
    let Some(active) = state.active() else {
        return Err(PlaceError::NoActive);
    };
    if active.kind != placement.piece.kind {
        return Err(PlaceError::KindMismatch);
    }

    for _ in 0..placement.rotation {
        if !state.apply_action(GameAction::RotateCw) {
            return Err(PlaceError::Blocked);
        }
    }

    loop {
        let Some(current) = state.active() else {
            return Err(PlaceError::NoActive);
        };
        let step = match current.x.cmp(&placement.piece.x) {
            std::cmp::Ordering::Less => GameAction::MoveRight,
            std::cmp::Ordering::Greater => GameAction::MoveLeft,
            std::cmp::Ordering::Equal => break,
        };
        if !state.apply_action(step) {
            return Err(PlaceError::Blocked);
        }
    }

    let ready = state
        .active()
        .is_some_and(|p| p.dropped(state.board()) == placement.piece);
    if !ready {
        return Err(PlaceError::Blocked);
    }
    if state.apply_action(GameAction::HardDrop) {
        Ok(())
    } else {
        Err(PlaceError::NotPlayable)
    }
}
