//! Move application.
//!
//! `apply_move` is the public entry point and never trusts the move it is
//! given: the move must appear in the legal move list of its origin square.
//! `make_move` is the unchecked core used by the legality filter itself.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::ChessMove;
use crate::utils::long_algebraic::move_to_long_algebraic;

/// Apply a legal move, returning the next position.
///
/// Fails with `IllegalMove` (leaving `game_state` untouched) when `mv` is
/// not one of the legal moves from `mv.from`.
pub fn apply_move(game_state: &GameState, mv: &ChessMove) -> ChessResult<GameState> {
    if mv.from >= 64 || mv.to >= 64 {
        return Err(ChessError::illegal(format!(
            "square index out of range: {} -> {}",
            mv.from, mv.to
        )));
    }
    if !legal_moves(game_state, Some(mv.from)).contains(mv) {
        return Err(ChessError::illegal(move_to_long_algebraic(mv)));
    }
    Ok(make_move(game_state, mv))
}

/// Apply `mv` without checking legality.
///
/// The move must have been produced by the generator for `game_state`;
/// a mismatched move description is a bug and panics.
pub(crate) fn make_move(game_state: &GameState, mv: &ChessMove) -> GameState {
    let mover = game_state.side_to_move;
    let enemy = mover.opposite();
    let mut next = game_state.clone();

    assert_eq!(
        game_state.kind_on(mover, mv.from),
        Some(mv.piece),
        "corrupt move: {mv:?} does not match the board"
    );
    next.remove_piece(Piece::new(mv.piece, mover), mv.from);

    if let Some(captured) = mv.captured {
        let capture_square = if mv.is_en_passant() {
            match mover {
                Color::White => mv.to - 8,
                Color::Black => mv.to + 8,
            }
        } else {
            mv.to
        };
        next.remove_piece(Piece::new(captured, enemy), capture_square);
    }

    let placed = mv.promotion.unwrap_or(mv.piece);
    next.put_piece(Piece::new(placed, mover), mv.to);

    if let Some(side) = mv.castle_side() {
        let geometry = castling_geometry(mover, side);
        let rook = Piece::new(PieceKind::Rook, mover);
        next.remove_piece(rook, geometry.rook_from);
        next.put_piece(rook, geometry.rook_to);
    }

    update_castling_rights(&mut next, mover, mv);

    // Set unconditionally; en-passant generation checks for a capturer.
    next.en_passant_square = mv.is_double_pawn_push().then(|| (mv.from + mv.to) / 2);

    if mv.is_irreversible() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if mover == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }
    next.side_to_move = enemy;

    next
}

fn update_castling_rights(game_state: &mut GameState, mover: Color, mv: &ChessMove) {
    if mv.piece == PieceKind::King {
        game_state.castling_rights &= !(castling_right(mover, CastleSide::Kingside)
            | castling_right(mover, CastleSide::Queenside));
    }

    // A rook leaving its home square, or anything landing on one, ends
    // that wing's right.
    for color in [Color::White, Color::Black] {
        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            let rook_home = castling_geometry(color, side).rook_from;
            if mv.from == rook_home || mv.to == rook_home {
                game_state.castling_rights &= !castling_right(color, side);
            }
        }
    }
}
