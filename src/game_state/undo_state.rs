use crate::game_state::game_state::GameState;
use crate::moves::chess_move::ChessMove;

/// Single undo record: the move played and the exact position before it.
///
/// Positions are small values, so undo restores a copy instead of
/// reversing the move piece by piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: ChessMove,
    pub previous: GameState,
}
