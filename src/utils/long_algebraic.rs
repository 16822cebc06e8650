//! Long algebraic (coordinate) notation: `e2e4`, `e7e8q`, `e1g1`.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::find_legal_move;
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn move_to_long_algebraic(mv: &ChessMove) -> String {
    let mut out = square_to_algebraic(mv.from);
    out.push_str(&square_to_algebraic(mv.to));
    if let Some(promotion) = mv.promotion {
        out.push(promotion.letter().to_ascii_lowercase());
    }
    out
}

/// Resolve coordinate notation into the legal move it names.
///
/// `InvalidNotation` for text that is not `<square><square>[nbrq]`;
/// `IllegalMove` when the position has no such move.
pub fn long_algebraic_to_move(long_algebraic: &str, game_state: &GameState) -> ChessResult<ChessMove> {
    let (from, to, promotion) = parse_long_algebraic(long_algebraic)?;
    find_legal_move(game_state, from, to, promotion)
}

/// Split coordinate notation into squares and an optional promotion kind
/// without consulting a position.
pub fn parse_long_algebraic(text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::notation(format!("invalid long algebraic move: {text}")));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => Some(char_to_promotion(ch)?),
    };

    Ok((from, to, promotion))
}

fn char_to_promotion(ch: char) -> ChessResult<PieceKind> {
    PieceKind::from_letter(ch)
        .filter(|kind| kind.is_promotion_target())
        .ok_or_else(|| ChessError::notation(format!("invalid promotion piece: {ch}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::chess_move::SpecialMove;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn long_algebraic_round_trip_simple_move() {
        let game_state = parse_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let mv = long_algebraic_to_move("e2e4", &game_state).expect("move should parse");
        assert!(mv.is_double_pawn_push());
        assert_eq!(move_to_long_algebraic(&mv), "e2e4");
    }

    #[test]
    fn long_algebraic_round_trip_promotion() {
        let game_state = parse_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        let mv = long_algebraic_to_move("a7a8q", &game_state).expect("move should parse");
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
        assert_eq!(move_to_long_algebraic(&mv), "a7a8q");

        assert!(matches!(
            long_algebraic_to_move("a7a8", &game_state),
            Err(ChessError::IllegalMove(_))
        ));
        assert!(matches!(
            long_algebraic_to_move("a7a8k", &game_state),
            Err(ChessError::InvalidNotation(_))
        ));
    }

    #[test]
    fn long_algebraic_detects_castling_and_en_passant() {
        let castle_state =
            parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let castle = long_algebraic_to_move("e1g1", &castle_state).expect("castle should parse");
        assert_eq!(castle.special, SpecialMove::KingsideCastle);

        let en_passant_state =
            parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let ep = long_algebraic_to_move("e5d6", &en_passant_state).expect("en passant should parse");
        assert!(ep.is_en_passant());
    }

    #[test]
    fn malformed_text_is_invalid_notation() {
        for text in ["", "e2", "e2e", "e2e4qq", "z2e4", "e2e9", "é2e4"] {
            assert!(
                matches!(parse_long_algebraic(text), Err(ChessError::InvalidNotation(_))),
                "{text:?}"
            );
        }
    }
}
