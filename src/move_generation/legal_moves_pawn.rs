use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::{ChessMove, SpecialMove};
use crate::moves::leaper_tables::pawn_attacks;

/// Pseudo-legal moves of the side-to-move pawn on `from`, ascending by
/// destination. Moves onto the last rank expand into one move per
/// promotion kind in N, B, R, Q order.
pub fn generate_pawn_moves(game_state: &GameState, from: Square, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move;
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];
    let empty = !game_state.occupancy_all;
    let start = out.len();

    // Pushes. Pawns never stand on the last rank, so one step stays on board.
    let one_step = match side {
        Color::White => from + 8,
        Color::Black => from - 8,
    };
    if square_mask(one_step) & empty != 0 {
        push_with_promotions(side, ChessMove::quiet(from, one_step, PieceKind::Pawn), out);

        if rank_of(from) == side.pawn_home_rank() {
            let two_step = match side {
                Color::White => from + 16,
                Color::Black => from - 16,
            };
            if square_mask(two_step) & empty != 0 {
                out.push(ChessMove::quiet(from, two_step, PieceKind::Pawn));
            }
        }
    }

    // Captures, including en passant onto an empty target.
    let mut attacks = pawn_attacks(side, from);
    while attacks != 0 {
        let to = attacks.trailing_zeros() as Square;
        let to_mask = square_mask(to);
        if to_mask & enemy_occ != 0 {
            if let Some(captured) = game_state.kind_on(side.opposite(), to) {
                push_with_promotions(
                    side,
                    ChessMove::capture(from, to, PieceKind::Pawn, captured),
                    out,
                );
            }
        } else if game_state.en_passant_square == Some(to) {
            out.push(ChessMove {
                special: SpecialMove::EnPassant,
                ..ChessMove::capture(from, to, PieceKind::Pawn, PieceKind::Pawn)
            });
        }
        attacks &= attacks - 1;
    }

    // Stable: promotion order survives the sort.
    out[start..].sort_by_key(|mv| mv.to);
}

fn push_with_promotions(side: Color, mv: ChessMove, out: &mut Vec<ChessMove>) {
    if rank_of(mv.to) == side.promotion_rank() {
        out.extend(
            PieceKind::PROMOTIONS
                .into_iter()
                .map(|promotion| mv.with_promotion(promotion)),
        );
    } else {
        out.push(mv);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("square should parse")
    }

    fn moves_from(fen: &str, from: &str) -> Vec<ChessMove> {
        let state = GameState::from_fen(fen).expect("FEN");
        let mut out = Vec::new();
        generate_pawn_moves(&state, sq(from), &mut out);
        out
    }

    #[test]
    fn home_rank_pawn_has_single_and_double_push() {
        let moves = moves_from(crate::game_state::chess_rules::STARTING_POSITION_FEN, "e2");
        let targets: Vec<Square> = moves.iter().map(|m| m.to).collect();
        assert_eq!(targets, vec![sq("e3"), sq("e4")]);
        assert!(moves[1].is_double_pawn_push());
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let moves = moves_from("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", "e2");
        assert!(moves.is_empty());
    }

    #[test]
    fn black_pawn_captures_and_pushes_sorted_by_destination() {
        let moves = moves_from("4k3/3p4/2N1N3/8/8/8/8/4K3 b - - 0 1", "d7");
        let targets: Vec<Square> = moves.iter().map(|m| m.to).collect();
        assert_eq!(targets, vec![sq("d5"), sq("c6"), sq("d6"), sq("e6")]);
        assert_eq!(moves[1].captured, Some(PieceKind::Knight));
        assert_eq!(moves[2].captured, None);
    }

    #[test]
    fn promotion_expands_in_fixed_order() {
        let moves = moves_from("1n5k/P7/8/8/8/8/8/K7 w - - 0 1", "a7");
        let shapes: Vec<(Square, Option<PieceKind>, Option<PieceKind>)> = moves
            .iter()
            .map(|m| (m.to, m.captured, m.promotion))
            .collect();
        let mut expected = Vec::new();
        for kind in PieceKind::PROMOTIONS {
            expected.push((sq("a8"), None, Some(kind)));
        }
        for kind in PieceKind::PROMOTIONS {
            expected.push((sq("b8"), Some(PieceKind::Knight), Some(kind)));
        }
        assert_eq!(shapes, expected);
    }

    #[test]
    fn en_passant_target_generates_tagged_capture() {
        let moves = moves_from(
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "e5",
        );
        let ep = moves
            .iter()
            .find(|m| m.to == sq("f6"))
            .expect("en passant capture should be generated");
        assert!(ep.is_en_passant());
        assert_eq!(ep.captured, Some(PieceKind::Pawn));
        // d6 is not a target: the d-pawn pushed earlier.
        assert!(moves.iter().all(|m| m.to != sq("d6")));
    }
}
