//! Standard Algebraic Notation (SAN).
//!
//! Generation follows the usual conventions: piece letter (none for pawns),
//! the minimum disambiguation needed (origin file, else origin rank, else
//! both), `x` for captures, the destination, `=Q` style promotion and a
//! `+` / `#` suffix. Parsing accepts the same shape, tolerates trailing
//! `+ # ! ?` marks, zero-based castling (`0-0`) and over-disambiguated
//! moves, and resolves against the legal move list.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_generator::{annotate, legal_moves};
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::{algebraic_to_square, file_char, rank_char, square_to_algebraic};

/// SAN for `mv`, which must be legal in `game_state`.
pub fn move_to_san(game_state: &GameState, mv: &ChessMove) -> String {
    let mut out = san_body(mv, &legal_moves(game_state, None));

    let annotations = annotate(&make_move(game_state, mv));
    if annotations.gives_checkmate {
        out.push('#');
    } else if annotations.gives_check {
        out.push('+');
    }
    out
}

fn san_body(mv: &ChessMove, legal: &[ChessMove]) -> String {
    if let Some(side) = mv.castle_side() {
        return match side {
            CastleSide::Kingside => "O-O".to_owned(),
            CastleSide::Queenside => "O-O-O".to_owned(),
        };
    }

    let mut out = String::with_capacity(8);
    if mv.piece == PieceKind::Pawn {
        if mv.is_capture() {
            out.push(file_char(mv.from));
        }
    } else {
        out.push(mv.piece.letter());
        out.push_str(&disambiguation(mv, legal));
    }

    if mv.is_capture() {
        out.push('x');
    }
    out.push_str(&square_to_algebraic(mv.to));

    if let Some(promotion) = mv.promotion {
        out.push('=');
        out.push(promotion.letter());
    }

    out
}

fn disambiguation(mv: &ChessMove, legal: &[ChessMove]) -> String {
    let rivals: Vec<Square> = legal
        .iter()
        .filter(|other| other.piece == mv.piece && other.to == mv.to && other.from != mv.from)
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|&sq| file_of(sq) != file_of(mv.from)) {
        file_char(mv.from).to_string()
    } else if rivals.iter().all(|&sq| rank_of(sq) != rank_of(mv.from)) {
        rank_char(mv.from).to_string()
    } else {
        square_to_algebraic(mv.from)
    }
}

/// Resolve SAN text into the legal move it names.
///
/// `InvalidNotation` for empty or malformed text; `IllegalMove` when no
/// legal move matches or the text matches more than one.
pub fn san_to_move(game_state: &GameState, san: &str) -> ChessResult<ChessMove> {
    let token = parse_san(san)?;
    let legal = legal_moves(game_state, None);

    let matches: Vec<&ChessMove> = match token {
        SanToken::Castle(side) => legal
            .iter()
            .filter(|mv| mv.castle_side() == Some(side))
            .collect(),
        SanToken::Move(parts) => legal
            .iter()
            .filter(|mv| parts.matches(mv))
            .collect(),
    };

    match matches.as_slice() {
        [mv] => Ok(**mv),
        [] => Err(ChessError::illegal(san.trim())),
        _ => Err(ChessError::illegal(format!("{} is ambiguous", san.trim()))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SanToken {
    Castle(CastleSide),
    Move(SanParts),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SanParts {
    piece: PieceKind,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    capture: bool,
    to: Square,
    promotion: Option<PieceKind>,
}

impl SanParts {
    fn matches(&self, mv: &ChessMove) -> bool {
        mv.piece == self.piece
            && mv.to == self.to
            && mv.promotion == self.promotion
            && mv.castle_side().is_none()
            && self.from_file.is_none_or(|file| file_of(mv.from) == file)
            && self.from_rank.is_none_or(|rank| rank_of(mv.from) == rank)
            && (!self.capture || mv.is_capture())
            && (self.piece != PieceKind::Pawn || self.pawn_shape_matches(mv))
    }

    /// Pawn captures must name their origin file and pushes stay on the
    /// destination file, so `e5` never resolves to `dxe5`.
    fn pawn_shape_matches(&self, mv: &ChessMove) -> bool {
        if mv.is_capture() {
            self.capture && self.from_file == Some(file_of(mv.from))
        } else {
            !self.capture && file_of(mv.from) == file_of(self.to)
        }
    }
}

fn parse_san(san: &str) -> ChessResult<SanToken> {
    let malformed = || ChessError::notation(format!("invalid SAN: {san:?}"));

    let text = san
        .trim()
        .trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'));
    if text.is_empty() || !text.is_ascii() {
        return Err(malformed());
    }

    match text {
        "O-O" | "0-0" => return Ok(SanToken::Castle(CastleSide::Kingside)),
        "O-O-O" | "0-0-0" => return Ok(SanToken::Castle(CastleSide::Queenside)),
        _ => {}
    }

    let mut body = text;

    let piece = match body.chars().next() {
        Some(ch @ ('N' | 'B' | 'R' | 'Q' | 'K')) => {
            body = &body[1..];
            PieceKind::from_letter(ch).ok_or_else(malformed)?
        }
        _ => PieceKind::Pawn,
    };

    let mut promotion = None;
    if piece == PieceKind::Pawn {
        let promotion_letter = body
            .strip_suffix(|c: char| matches!(c, 'N' | 'B' | 'R' | 'Q'))
            .map(|rest| (rest, body.chars().last()));
        if let Some((rest, Some(letter))) = promotion_letter {
            body = rest.strip_suffix('=').unwrap_or(rest);
            promotion = PieceKind::from_letter(letter);
        }
    }

    if body.len() < 2 {
        return Err(malformed());
    }
    let (prefix, destination) = body.split_at(body.len() - 2);
    let to = algebraic_to_square(destination).map_err(|_| malformed())?;

    let mut from_file = None;
    let mut from_rank = None;
    let mut capture = false;
    let mut rest = prefix.bytes().peekable();
    if let Some(&b @ b'a'..=b'h') = rest.peek() {
        from_file = Some(b - b'a');
        rest.next();
    }
    if let Some(&b @ b'1'..=b'8') = rest.peek() {
        from_rank = Some(b - b'1');
        rest.next();
    }
    if rest.peek() == Some(&b'x') {
        capture = true;
        rest.next();
    }
    if rest.next().is_some() {
        return Err(malformed());
    }

    Ok(SanToken::Move(SanParts {
        piece,
        from_file,
        from_rank,
        capture,
        to,
        promotion,
    }))
}
