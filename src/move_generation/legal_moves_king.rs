use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_target_moves;
use crate::moves::chess_move::{ChessMove, SpecialMove};
use crate::moves::leaper_tables::king_attacks;

/// King steps ascending by destination, then kingside and queenside
/// castling when available.
pub fn generate_king_moves(game_state: &GameState, from: Square, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move;
    let own_occ = game_state.occupancy_by_color[side.index()];
    push_target_moves(game_state, from, PieceKind::King, king_attacks(from) & !own_occ, out);

    for castle_side in [CastleSide::Kingside, CastleSide::Queenside] {
        if let Some(mv) = castling_move(game_state, from, castle_side) {
            out.push(mv);
        }
    }
}

/// The castling move for `castle_side`, if the right is held, the squares
/// between king and rook are empty, and no square on the king's path
/// (start included) is attacked.
fn castling_move(game_state: &GameState, from: Square, castle_side: CastleSide) -> Option<ChessMove> {
    let side = game_state.side_to_move;
    let geometry = castling_geometry(side, castle_side);

    if from != geometry.king_from || !game_state.can_castle(side, castle_side) {
        return None;
    }
    if game_state.kind_on(side, geometry.rook_from) != Some(PieceKind::Rook) {
        return None;
    }
    if game_state.occupancy_all & geometry.must_be_empty != 0 {
        return None;
    }
    let enemy = side.opposite();
    if geometry
        .king_path
        .iter()
        .any(|&square| is_square_attacked(game_state, square, enemy))
    {
        return None;
    }

    let special = match castle_side {
        CastleSide::Kingside => SpecialMove::KingsideCastle,
        CastleSide::Queenside => SpecialMove::QueensideCastle,
    };
    Some(ChessMove {
        special,
        ..ChessMove::quiet(geometry.king_from, geometry.king_to, PieceKind::King)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("square should parse")
    }

    fn king_moves(fen: &str) -> Vec<ChessMove> {
        let state = GameState::from_fen(fen).expect("FEN");
        let from = state.king_square(state.side_to_move);
        let mut out = Vec::new();
        generate_king_moves(&state, from, &mut out);
        out
    }

    #[test]
    fn both_castles_follow_ordinary_steps() {
        let moves = king_moves("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let specials: Vec<SpecialMove> = moves.iter().map(|m| m.special).collect();
        assert_eq!(
            &specials[specials.len() - 2..],
            &[SpecialMove::KingsideCastle, SpecialMove::QueensideCastle]
        );
        assert_eq!(moves[moves.len() - 2].to, sq("g1"));
        assert_eq!(moves[moves.len() - 1].to, sq("c1"));
        assert!(moves[..moves.len() - 2]
            .iter()
            .all(|m| m.special == SpecialMove::None));
    }

    #[test]
    fn no_castling_through_attacked_square() {
        // Black rook on f8 covers f1.
        let moves = king_moves("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(moves.iter().all(|m| m.special != SpecialMove::KingsideCastle));
        assert!(moves.iter().any(|m| m.special == SpecialMove::QueensideCastle));
    }

    #[test]
    fn no_castling_out_of_check() {
        let moves = king_moves("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(moves.iter().all(|m| m.castle_side().is_none()));
    }

    #[test]
    fn queenside_needs_b_file_empty_but_not_safe() {
        // b1 attacked by the rook on b8 does not matter; b1 occupied does.
        let open = king_moves("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(open.iter().any(|m| m.special == SpecialMove::QueensideCastle));

        let blocked = king_moves("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1");
        assert!(blocked.iter().all(|m| m.special != SpecialMove::QueensideCastle));
    }

    #[test]
    fn no_castling_without_right() {
        let moves = king_moves("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1");
        assert!(moves.iter().all(|m| m.castle_side().is_none()));
    }
}
