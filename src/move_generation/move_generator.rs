//! Move generator trait seam.
//!
//! Collaborators that want every legal move together with the position it
//! leads to (perft, random playouts, an external AI) go through
//! `MoveGenerator` instead of calling the per-square functions directly.

use crate::game_state::game_state::GameState;
use crate::moves::chess_move::ChessMove;

/// Facts about a move that are only known after applying it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveAnnotations {
    pub gives_check: bool,
    pub gives_checkmate: bool,
}

#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub mv: ChessMove,
    pub game_after_move: GameState,
    pub annotations: MoveAnnotations,
}

pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState) -> Vec<GeneratedMove>;
}
