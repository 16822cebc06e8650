//! Full legal move generation pipeline.
//!
//! Per-square pseudo-legal generation dispatched by piece kind, filtered by
//! applying each candidate to a scratch position and rejecting those that
//! leave the mover's king attacked.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_shared::generate_piece_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::move_generator::{GeneratedMove, MoveAnnotations, MoveGenerator};
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::square_to_algebraic;

/// Pseudo-legal moves of the side-to-move piece on `square`.
///
/// Empty when the square is empty, holds an opponent piece, or is not a
/// board index (`>= 64`).
pub fn pseudo_legal_moves(game_state: &GameState, square: Square) -> Vec<ChessMove> {
    let mut out = Vec::with_capacity(32);
    push_pseudo_legal_moves(game_state, square, &mut out);
    out
}

fn push_pseudo_legal_moves(game_state: &GameState, square: Square, out: &mut Vec<ChessMove>) {
    let Some(kind) = game_state.kind_on(game_state.side_to_move, square) else {
        return;
    };
    match kind {
        PieceKind::Pawn => generate_pawn_moves(game_state, square, out),
        PieceKind::King => generate_king_moves(game_state, square, out),
        _ => generate_piece_moves(game_state, square, kind, out),
    }
}

/// Legal moves for the side to move, from `from` only or from every square.
///
/// Ordering is deterministic: origins ascend a1..h8 and each origin keeps
/// its generator's order. An out-of-range `from` yields no moves.
pub fn legal_moves(game_state: &GameState, from: Option<Square>) -> Vec<ChessMove> {
    let mover = game_state.side_to_move;
    let mut pseudo = Vec::with_capacity(64);
    match from {
        Some(square) => push_pseudo_legal_moves(game_state, square, &mut pseudo),
        None => {
            let mut own = game_state.occupancy_by_color[mover.index()];
            while own != 0 {
                push_pseudo_legal_moves(game_state, own.trailing_zeros() as Square, &mut pseudo);
                own &= own - 1;
            }
        }
    }

    pseudo.retain(|mv| !is_king_in_check(&make_move(game_state, mv), mover));
    pseudo
}

/// Resolve `(from, to, promotion)` into the full legal move it names.
///
/// A pawn reaching the last rank needs a promotion kind; every other move
/// must not carry one.
pub fn find_legal_move(
    game_state: &GameState,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> ChessResult<ChessMove> {
    let candidates: Vec<ChessMove> = legal_moves(game_state, Some(from))
        .into_iter()
        .filter(|mv| mv.to == to)
        .collect();

    if candidates.is_empty() {
        if from >= 64 || to >= 64 {
            return Err(ChessError::illegal(format!(
                "square index out of range: {from} -> {to}"
            )));
        }
        let request = format!("{}{}", square_to_algebraic(from), square_to_algebraic(to));
        return Err(ChessError::illegal(request));
    }

    // Candidates exist, so both squares are on the board.
    let request = || format!("{}{}", square_to_algebraic(from), square_to_algebraic(to));
    if let Some(mv) = candidates.iter().find(|mv| mv.promotion == promotion) {
        return Ok(*mv);
    }
    match promotion {
        None => Err(ChessError::illegal(format!(
            "{} requires a promotion piece",
            request()
        ))),
        Some(kind) => Err(ChessError::illegal(format!(
            "{} cannot promote to {kind:?}",
            request()
        ))),
    }
}

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> Vec<GeneratedMove> {
        legal_moves(game_state, None)
            .into_iter()
            .map(|mv| {
                let next = make_move(game_state, &mv);
                let annotations = annotate(&next);
                GeneratedMove {
                    mv,
                    game_after_move: next,
                    annotations,
                }
            })
            .collect()
    }
}

/// Check and mate flags for the position a move produced.
pub fn annotate(after_move: &GameState) -> MoveAnnotations {
    let gives_check = is_king_in_check(after_move, after_move.side_to_move);
    let gives_checkmate = gives_check && legal_moves(after_move, None).is_empty();
    MoveAnnotations {
        gives_check,
        gives_checkmate,
    }
}
