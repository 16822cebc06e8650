//! Square attack detection.
//!
//! `is_square_attacked` is the one attack primitive in the crate: the
//! legality filter, castling path checks, check detection and FEN
//! validation all route through it.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::leaper_tables::{king_attacks, knight_attacks, pawn_attacks};
use crate::moves::sliding_rays::{bishop_attacks, rook_attacks};

/// Is `square` attacked by any piece of `attacker_color`?
///
/// Works backwards from the target: a knight attacks `square` exactly when
/// a knight on `square` would attack the knight, and likewise for the other
/// kinds. Pawns use the defender's capture direction for the same reason.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let attacker = |kind: PieceKind| game_state.bitboard(attacker_color, kind);

    if pawn_attacks(attacker_color.opposite(), square) & attacker(PieceKind::Pawn) != 0 {
        return true;
    }

    if knight_attacks(square) & attacker(PieceKind::Knight) != 0 {
        return true;
    }

    if king_attacks(square) & attacker(PieceKind::King) != 0 {
        return true;
    }

    let bishops_queens = attacker(PieceKind::Bishop) | attacker(PieceKind::Queen);
    if bishop_attacks(square, game_state.occupancy_all) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = attacker(PieceKind::Rook) | attacker(PieceKind::Queen);
    rook_attacks(square, game_state.occupancy_all) & rooks_queens != 0
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    is_square_attacked(game_state, game_state.king_square(color), color.opposite())
}
