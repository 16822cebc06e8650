//! FEN-to-GameState parser.
//!
//! Builds a fully-populated position from a Forsyth-Edwards Notation
//! string, including piece bitboards, rights, clocks and occupancies, then
//! rejects anything that is not a structurally valid chess position.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::utils::algebraic::algebraic_to_square;

const MAX_PIECES_PER_SIDE: u32 = 16;
const MAX_PAWNS_PER_SIDE: u32 = 8;
const BACK_RANKS: u64 = 0xFF00_0000_0000_00FF;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| missing("board layout"))?;
    let side_part = parts.next().ok_or_else(|| missing("side-to-move"))?;
    let castling_part = parts.next().ok_or_else(|| missing("castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| missing("en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| missing("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| missing("fullmove number"))?;

    if parts.next().is_some() {
        return Err(ChessError::notation("FEN has extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::notation(format!("invalid halfmove clock: {halfmove_part}")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::notation(format!("invalid fullmove number: {fullmove_part}")))?;
    if game_state.fullmove_number == 0 {
        return Err(ChessError::notation("fullmove number must be at least 1"));
    }

    game_state.recalc_occupancy();
    validate_position(&game_state)?;

    Ok(game_state)
}

fn missing(field: &str) -> ChessError {
    ChessError::notation(format!("missing {field} in FEN"))
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::notation("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;
        let mut previous_was_digit = false;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) || previous_was_digit {
                    return Err(ChessError::notation(format!(
                        "invalid empty-square count '{ch}' in rank '{rank_str}'"
                    )));
                }
                file += empty_count as u8;
                previous_was_digit = true;
                if file > 8 {
                    break;
                }
                continue;
            }
            previous_was_digit = false;

            let piece = Piece::from_fen_char(ch).ok_or_else(|| {
                ChessError::notation(format!("invalid piece character '{ch}' in board layout"))
            })?;

            if file >= 8 {
                return Err(ChessError::notation(format!(
                    "rank '{rank_str}' has too many files"
                )));
            }

            game_state.put_piece(piece, square_at(file, board_rank));
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::notation(format!(
                "rank '{rank_str}' does not sum to 8 files"
            )));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessError::notation(format!(
            "invalid side-to-move field: {side_part}"
        ))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        let bit = match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => {
                return Err(ChessError::notation(format!(
                    "invalid castling rights character: {ch}"
                )))
            }
        };
        if rights & bit != 0 {
            return Err(ChessError::notation(format!(
                "duplicate castling rights character: {ch}"
            )));
        }
        rights |= bit;
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    Ok(Some(algebraic_to_square(en_passant_part)?))
}

fn validate_position(game_state: &GameState) -> ChessResult<()> {
    for color in [Color::White, Color::Black] {
        let kings = game_state.count(color, PieceKind::King);
        if kings != 1 {
            return Err(ChessError::notation(format!(
                "{color:?} must have exactly one king, found {kings}"
            )));
        }
        if game_state.count(color, PieceKind::Pawn) > MAX_PAWNS_PER_SIDE {
            return Err(ChessError::notation(format!("{color:?} has more than 8 pawns")));
        }
        if game_state.occupancy_by_color[color.index()].count_ones() > MAX_PIECES_PER_SIDE {
            return Err(ChessError::notation(format!(
                "{color:?} has more than 16 pieces"
            )));
        }
        if game_state.bitboard(color, PieceKind::Pawn) & BACK_RANKS != 0 {
            return Err(ChessError::notation("pawns cannot stand on the first or last rank"));
        }
    }

    validate_castling_rights(game_state)?;
    validate_en_passant(game_state)?;

    if is_king_in_check(game_state, game_state.side_to_move.opposite()) {
        return Err(ChessError::notation("side not to move is in check"));
    }

    Ok(())
}

fn validate_castling_rights(game_state: &GameState) -> ChessResult<()> {
    for color in [Color::White, Color::Black] {
        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            if !game_state.can_castle(color, side) {
                continue;
            }
            let geometry = castling_geometry(color, side);
            let king_home = game_state.kind_on(color, geometry.king_from) == Some(PieceKind::King);
            let rook_home = game_state.kind_on(color, geometry.rook_from) == Some(PieceKind::Rook);
            if !king_home || !rook_home {
                return Err(ChessError::notation(format!(
                    "{color:?} {side:?} castling right without king and rook on home squares"
                )));
            }
        }
    }
    Ok(())
}

fn validate_en_passant(game_state: &GameState) -> ChessResult<()> {
    let Some(target) = game_state.en_passant_square else {
        return Ok(());
    };

    // The pawn that just double-pushed belongs to the side not to move.
    let pusher = game_state.side_to_move.opposite();
    let expected_rank = match pusher {
        Color::White => 2,
        Color::Black => 5,
    };
    if rank_of(target) != expected_rank {
        return Err(ChessError::notation(format!(
            "en-passant square on wrong rank for {:?} to move",
            game_state.side_to_move
        )));
    }

    let (pawn_square, origin_square) = match pusher {
        Color::White => (target + 8, target - 8),
        Color::Black => (target - 8, target + 8),
    };

    let pawn_in_place = game_state.kind_on(pusher, pawn_square) == Some(PieceKind::Pawn);
    let path_clear = game_state.occupancy_all
        & (square_mask(target) | square_mask(origin_square))
        == 0;
    if !pawn_in_place || !path_clear {
        return Err(ChessError::notation(
            "en-passant square does not follow a double pawn push",
        ));
    }

    Ok(())
}
