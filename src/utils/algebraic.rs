//! Square name and display-coordinate conversions.
//!
//! Converts between human-readable coordinates (e.g., `e4`), internal square
//! indices, and the `(row, col)` pairs a board renderer uses, where row 0 is
//! rank 8 and col 0 is file a. The mapping does not depend on bitboard layout.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{file_of, rank_of, square_at, Square};

/// Convert algebraic notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::notation(format!("invalid algebraic square: {square}")));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::notation(format!(
            "invalid algebraic file: {}",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::notation(format!(
            "invalid algebraic rank: {}",
            rank as char
        )));
    }

    Ok(square_at(file - b'a', rank - b'1'))
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
///
/// Panics on an out-of-range index: squares are only produced internally.
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    assert!(square < 64, "square index out of bounds: {square}");
    format!("{}{}", file_char(square), rank_char(square))
}

#[inline]
pub fn file_char(square: Square) -> char {
    char::from(b'a' + file_of(square))
}

#[inline]
pub fn rank_char(square: Square) -> char {
    char::from(b'1' + rank_of(square))
}

/// Display coordinates of a square name: `(row, col)` with row 0 == rank 8.
pub fn square_to_coords(square: &str) -> ChessResult<(u8, u8)> {
    let sq = algebraic_to_square(square)?;
    Ok((7 - rank_of(sq), file_of(sq)))
}

/// Square name of display coordinates `(row, col)` with row 0 == rank 8.
pub fn coords_to_square(row: u8, col: u8) -> ChessResult<String> {
    if row > 7 || col > 7 {
        return Err(ChessError::notation(format!(
            "board coordinates out of range: ({row}, {col})"
        )));
    }
    Ok(square_to_algebraic(square_at(col, 7 - row)))
}
