use blockfall_core::GameState;

use crate::search::Placement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlaceError {
    #[display("game is not playable")]
    NotPlayable,
    #[display("no active piece")]
    NoActive,
    #[display("placement is for a different piece kind")]
    KindMismatch,
    #[display("placement collides with the board")]
    Blocked,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "not_playable",
            PlaceError::NoActive => "no_active",
            PlaceError::KindMismatch | PlaceError::Blocked => "invalid_place",
        }
    }
}

/// Lock `placement` in a running game, like a hard drop from its landing spot.
pub fn apply_placement(state: &mut GameState, placement: &Placement) -> Result<(), PlaceError> {
    if state.game_over() || !state.started() {
        return Err(PlaceError::NotPlayable);
    }
    let Some(active) = state.active() else {
        return Err(PlaceError::NoActive);
    };
    if active.kind != placement.piece.kind {
        return Err(PlaceError::KindMismatch);
    }
    if !state.place_piece(placement.piece) {
        return Err(PlaceError::Blocked);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::find_best_move;
    use blockfall_core::types::PieceKind;
    use blockfall_core::{GameConfig, Piece};

    fn started() -> GameState {
        let mut gs = GameState::new(GameConfig {
            seed: Some(1),
            ..GameConfig::instant()
        });
        gs.start();
        gs
    }

    #[test]
    fn place_rejected_before_start() {
        let mut gs = GameState::with_seed(1);
        let placement = Placement {
            rotation: 0,
            piece: Piece::spawn(PieceKind::T, 10),
            score: 0.0,
        };
        let err = apply_placement(&mut gs, &placement).unwrap_err();
        assert_eq!(err, PlaceError::NotPlayable);
        assert_eq!(err.code(), "not_playable");
    }

    #[test]
    fn place_rejected_for_other_kind() {
        let mut gs = started();
        let active = gs.active().unwrap();
        let other = PieceKind::ALL
            .into_iter()
            .find(|&k| k != active.kind)
            .unwrap();
        let placement = Placement {
            rotation: 0,
            piece: Piece::spawn(other, 10),
            score: 0.0,
        };
        assert_eq!(
            apply_placement(&mut gs, &placement),
            Err(PlaceError::KindMismatch)
        );
    }

    #[test]
    fn best_move_locks_and_spawns_next() {
        let mut gs = started();
        let active = gs.active().unwrap();
        let placement = find_best_move(gs.board(), &active).unwrap();
        apply_placement(&mut gs, &placement).unwrap();
        assert_eq!(gs.pieces_spawned(), 2);
        assert_eq!(
            gs.board().cells().iter().filter(|c| c.is_some()).count(),
            4
        );
    }
}
