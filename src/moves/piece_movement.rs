//! Per-kind movement dispatch.
//!
//! Piece behavior is a flat match over `PieceKind` returning an attack set,
//! so move generation and attack detection share one table lookup per kind.

use crate::game_state::chess_types::{Piece, PieceKind, Square};
use crate::moves::leaper_tables::{king_attacks, knight_attacks, pawn_attacks};
use crate::moves::sliding_rays::{bishop_attacks, queen_attacks, rook_attacks};

/// Squares `piece` on `square` attacks given board `occupancy`.
///
/// For pawns this is the diagonal capture set only; pushes are generated
/// separately because they never capture.
#[inline]
pub fn attack_set(piece: Piece, square: Square, occupancy: u64) -> u64 {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, square),
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Bishop => bishop_attacks(square, occupancy),
        PieceKind::Rook => rook_attacks(square, occupancy),
        PieceKind::Queen => queen_attacks(square, occupancy),
        PieceKind::King => king_attacks(square),
    }
}
