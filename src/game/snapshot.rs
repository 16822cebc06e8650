//! Serializable views of a game for UI and AI collaborators.
//!
//! Squares are square names (`"e4"`) and the board is indexed by display
//! coordinates: `board[0]` is rank 8 and `board[r][0]` is the a-file.

use serde::{Deserialize, Serialize};

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::game_status::{DrawReason, GameStatus};
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::square_to_algebraic;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCell {
    pub piece: PieceKind,
    pub color: Color,
    pub square: String,
}

/// Per-color flags for one castling wing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingFlags {
    pub white: bool,
    pub black: bool,
}

/// A move request as an external player would send it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl From<&ChessMove> for MoveRequest {
    fn from(mv: &ChessMove) -> Self {
        Self {
            from: square_to_algebraic(mv.from),
            to: square_to_algebraic(mv.to),
            promotion: mv.promotion,
        }
    }
}

/// Everything known about one applied move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: String,
    pub to: String,
    pub piece: PieceKind,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<PieceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub castling: Option<CastleSide>,
    pub en_passant: bool,
    pub check: bool,
    pub checkmate: bool,
    pub san: String,
    /// FEN of the position after the move.
    pub fen: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: [[Option<BoardCell>; 8]; 8],
    pub current_player: Color,
    pub move_history: Vec<MoveRecord>,
    pub status: GameStatus,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub is_draw: bool,
    pub can_castle_kingside: CastlingFlags,
    pub can_castle_queenside: CastlingFlags,
    pub en_passant_square: Option<String>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
    pub fen: String,
}

impl GameSnapshot {
    pub(crate) fn capture(
        game_state: &GameState,
        status: GameStatus,
        is_check: bool,
        move_history: Vec<MoveRecord>,
    ) -> Self {
        let castling = |side| CastlingFlags {
            white: game_state.can_castle(Color::White, side),
            black: game_state.can_castle(Color::Black, side),
        };

        Self {
            board: board_rows(game_state),
            current_player: game_state.side_to_move,
            move_history,
            status,
            is_check,
            is_checkmate: matches!(status, GameStatus::Checkmate { .. }),
            is_stalemate: status == GameStatus::Stalemate,
            is_draw: matches!(status, GameStatus::Stalemate | GameStatus::Draw(_)),
            can_castle_kingside: castling(CastleSide::Kingside),
            can_castle_queenside: castling(CastleSide::Queenside),
            en_passant_square: game_state.en_passant_square.map(square_to_algebraic),
            halfmove_clock: game_state.halfmove_clock,
            fullmove_number: game_state.fullmove_number,
            fen: game_state.get_fen(),
        }
    }

    /// Reason for a non-stalemate draw, if any.
    pub fn draw_reason(&self) -> Option<DrawReason> {
        match self.status {
            GameStatus::Draw(reason) => Some(reason),
            _ => None,
        }
    }
}

fn board_rows(game_state: &GameState) -> [[Option<BoardCell>; 8]; 8] {
    std::array::from_fn(|row| {
        std::array::from_fn(|col| {
            let square = square_at(col as u8, 7 - row as u8);
            game_state.piece_at(square).map(|piece| BoardCell {
                piece: piece.kind,
                color: piece.color,
                square: square_to_algebraic(square),
            })
        })
    })
}
