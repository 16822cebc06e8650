//! Move description type.
//!
//! A `ChessMove` carries everything needed to apply or undo it without
//! re-deriving information from the board: the moved kind, the captured
//! kind, the promotion choice and a special-move tag.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{rank_of, CastleSide, PieceKind, Square};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialMove {
    #[default]
    None,
    KingsideCastle,
    QueensideCastle,
    EnPassant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub special: SpecialMove,
}

impl ChessMove {
    #[inline]
    pub const fn quiet(from: Square, to: Square, piece: PieceKind) -> Self {
        Self {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
            special: SpecialMove::None,
        }
    }

    #[inline]
    pub const fn capture(from: Square, to: Square, piece: PieceKind, captured: PieceKind) -> Self {
        Self {
            from,
            to,
            piece,
            captured: Some(captured),
            promotion: None,
            special: SpecialMove::None,
        }
    }

    #[inline]
    pub const fn with_promotion(mut self, promotion: PieceKind) -> Self {
        self.promotion = Some(promotion);
        self
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.special == SpecialMove::EnPassant
    }

    pub fn castle_side(&self) -> Option<CastleSide> {
        match self.special {
            SpecialMove::KingsideCastle => Some(CastleSide::Kingside),
            SpecialMove::QueensideCastle => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    /// A pawn advancing two ranks from its home rank.
    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece == PieceKind::Pawn && rank_of(self.from).abs_diff(rank_of(self.to)) == 2
    }

    /// Resets the halfmove clock.
    #[inline]
    pub fn is_irreversible(&self) -> bool {
        self.piece == PieceKind::Pawn || self.is_capture()
    }
}
