//! Canonical chess-rule constants and rule configuration.
//!
//! Holds the standard starting FEN, the fixed castling geometry, and the
//! `DrawRules` switches a `Game` consults when reporting automatic draws.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{CastleSide, Color, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-moves without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Occurrences of one position that constitute a repetition draw.
pub const REPETITION_COUNT: usize = 3;

/// Squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingGeometry {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook that must be empty.
    pub must_be_empty: u64,
    /// Squares the king stands on, crosses, or lands on; none may be attacked.
    pub king_path: [Square; 3],
}

pub const fn castling_geometry(color: Color, side: CastleSide) -> CastlingGeometry {
    match (color, side) {
        (Color::White, CastleSide::Kingside) => CastlingGeometry {
            king_from: 4,
            king_to: 6,
            rook_from: 7,
            rook_to: 5,
            must_be_empty: (1 << 5) | (1 << 6),
            king_path: [4, 5, 6],
        },
        (Color::White, CastleSide::Queenside) => CastlingGeometry {
            king_from: 4,
            king_to: 2,
            rook_from: 0,
            rook_to: 3,
            must_be_empty: (1 << 1) | (1 << 2) | (1 << 3),
            king_path: [4, 3, 2],
        },
        (Color::Black, CastleSide::Kingside) => CastlingGeometry {
            king_from: 60,
            king_to: 62,
            rook_from: 63,
            rook_to: 61,
            must_be_empty: (1 << 61) | (1 << 62),
            king_path: [60, 61, 62],
        },
        (Color::Black, CastleSide::Queenside) => CastlingGeometry {
            king_from: 60,
            king_to: 58,
            rook_from: 56,
            rook_to: 59,
            must_be_empty: (1 << 57) | (1 << 58) | (1 << 59),
            king_path: [60, 59, 58],
        },
    }
}

/// Which automatic draw conditions a game reports.
///
/// Stalemate is always a draw and is not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawRules {
    pub fifty_move_rule: bool,
    pub insufficient_material: bool,
    pub threefold_repetition: bool,
}

impl Default for DrawRules {
    fn default() -> Self {
        Self {
            fifty_move_rule: true,
            insufficient_material: true,
            threefold_repetition: true,
        }
    }
}
