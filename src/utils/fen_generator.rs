//! GameState-to-FEN serializer, the inverse of `fen_parser`.

use std::fmt::Write;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_to_algebraic;

const CASTLING_LETTERS: [(CastlingRights, char); 4] = [
    (CASTLE_WHITE_KINGSIDE, 'K'),
    (CASTLE_WHITE_QUEENSIDE, 'Q'),
    (CASTLE_BLACK_KINGSIDE, 'k'),
    (CASTLE_BLACK_QUEENSIDE, 'q'),
];

pub fn generate_fen(game_state: &GameState) -> String {
    let mut fen = placement_field(game_state);

    fen.push(' ');
    fen.push(match game_state.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    fen.push(' ');
    let castling_start = fen.len();
    for (bit, letter) in CASTLING_LETTERS {
        if game_state.castling_rights & bit != 0 {
            fen.push(letter);
        }
    }
    if fen.len() == castling_start {
        fen.push('-');
    }

    fen.push(' ');
    match game_state.en_passant_square {
        Some(square) => fen.push_str(&square_to_algebraic(square)),
        None => fen.push('-'),
    }

    // Writing into a String cannot fail.
    let _ = write!(
        fen,
        " {} {}",
        game_state.halfmove_clock, game_state.fullmove_number
    );
    fen
}

/// Piece placement, rank 8 first, runs of empty squares as digits.
fn placement_field(game_state: &GameState) -> String {
    let ranks: Vec<String> = (0..8u8)
        .rev()
        .map(|rank| {
            let mut row = String::with_capacity(8);
            let mut gap = 0u32;
            for file in 0..8u8 {
                match game_state.piece_at(square_at(file, rank)) {
                    Some(piece) => {
                        if gap > 0 {
                            row.extend(char::from_digit(gap, 10));
                            gap = 0;
                        }
                        row.push(piece.fen_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                row.extend(char::from_digit(gap, 10));
            }
            row
        })
        .collect();
    ranks.join("/")
}
