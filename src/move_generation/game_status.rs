//! Terminal position detection.
//!
//! Everything here is a pure function of one `GameState`. Threefold
//! repetition needs the game history and lives on `Game`.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_rules::{DrawRules, FIFTY_MOVE_HALFMOVES};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::legal_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }

    /// PGN result token.
    pub fn result_token(self) -> &'static str {
        match self {
            GameStatus::Ongoing => "*",
            GameStatus::Checkmate {
                winner: Color::White,
            } => "1-0",
            GameStatus::Checkmate {
                winner: Color::Black,
            } => "0-1",
            GameStatus::Stalemate | GameStatus::Draw(_) => "1/2-1/2",
        }
    }
}

#[inline]
pub fn is_check(game_state: &GameState) -> bool {
    is_king_in_check(game_state, game_state.side_to_move)
}

pub fn is_checkmate(game_state: &GameState) -> bool {
    is_check(game_state) && legal_moves(game_state, None).is_empty()
}

pub fn is_stalemate(game_state: &GameState) -> bool {
    !is_check(game_state) && legal_moves(game_state, None).is_empty()
}

/// Neither side can ever deliver mate: no pawns, rooks or queens, and
/// either at most one minor piece on the board or only bishops that all
/// stand on one square color.
pub fn is_insufficient_material(game_state: &GameState) -> bool {
    let heavy_or_pawn = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen];
    for color in [Color::White, Color::Black] {
        if heavy_or_pawn
            .iter()
            .any(|&kind| game_state.bitboard(color, kind) != 0)
        {
            return false;
        }
    }

    let both = |kind| game_state.bitboard(Color::White, kind) | game_state.bitboard(Color::Black, kind);
    let knights = both(PieceKind::Knight);
    let bishops = both(PieceKind::Bishop);

    if (knights | bishops).count_ones() <= 1 {
        return true;
    }
    if knights != 0 {
        return false;
    }

    const DARK_SQUARES: u64 = 0xAA55_AA55_AA55_AA55;
    bishops & DARK_SQUARES == 0 || bishops & !DARK_SQUARES == 0
}

#[inline]
pub fn is_fifty_move_draw(game_state: &GameState) -> bool {
    game_state.halfmove_clock >= FIFTY_MOVE_HALFMOVES
}

/// Status of a single position with every automatic draw rule applied.
///
/// Checkmate outranks the fifty-move rule: a mating move that brings the
/// clock to 100 still wins.
#[inline]
pub fn game_status(game_state: &GameState) -> GameStatus {
    position_status(game_state, &DrawRules::default())
}

/// Like [`game_status`], reporting only the draws `rules` enables.
///
/// Repetition is a property of a game, not a position; `Game` checks it.
pub fn position_status(game_state: &GameState, rules: &DrawRules) -> GameStatus {
    let no_moves = legal_moves(game_state, None).is_empty();
    if no_moves {
        return if is_check(game_state) {
            GameStatus::Checkmate {
                winner: game_state.side_to_move.opposite(),
            }
        } else {
            GameStatus::Stalemate
        };
    }
    if rules.insufficient_material && is_insufficient_material(game_state) {
        return GameStatus::Draw(DrawReason::InsufficientMaterial);
    }
    if rules.fifty_move_rule && is_fifty_move_draw(game_state) {
        return GameStatus::Draw(DrawReason::FiftyMoveRule);
    }
    GameStatus::Ongoing
}
