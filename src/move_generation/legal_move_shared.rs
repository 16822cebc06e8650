//! Helpers shared by the per-kind pseudo-legal generators.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::ChessMove;
use crate::moves::piece_movement::attack_set;

/// Push one move per set bit of `targets`, ascending by destination,
/// tagging captures with the enemy kind standing there.
pub fn push_target_moves(
    game_state: &GameState,
    from: Square,
    piece: PieceKind,
    mut targets: u64,
    out: &mut Vec<ChessMove>,
) {
    let enemy = game_state.side_to_move.opposite();
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        let mv = match game_state.kind_on(enemy, to) {
            Some(captured) => ChessMove::capture(from, to, piece, captured),
            None => ChessMove::quiet(from, to, piece),
        };
        out.push(mv);
        targets &= targets - 1;
    }
}

/// Knights, bishops, rooks and queens: every attacked square not held by
/// a friendly piece.
pub fn generate_piece_moves(
    game_state: &GameState,
    from: Square,
    kind: PieceKind,
    out: &mut Vec<ChessMove>,
) {
    let side = game_state.side_to_move;
    let own_occ = game_state.occupancy_by_color[side.index()];
    let targets = attack_set(Piece::new(kind, side), from, game_state.occupancy_all) & !own_occ;
    push_target_moves(game_state, from, kind, targets, out);
}
