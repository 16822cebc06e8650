//! Zobrist position keys for repetition detection.
//!
//! Keys are generated at compile time from a fixed seed, so they are
//! identical across runs and there is no global state to initialize.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::leaper_tables::pawn_attacks;

const SEED: u64 = 0x9E37_79B9_7F4A_7C15;

// 2 colors * 6 kinds * 64 squares, then side, 16 castling masks, 8 ep files.
const PIECE_SQUARE_KEYS: usize = 2 * 6 * 64;
const SIDE_KEY: usize = PIECE_SQUARE_KEYS;
const CASTLING_KEYS: usize = SIDE_KEY + 1;
const EN_PASSANT_KEYS: usize = CASTLING_KEYS + 16;
const KEY_COUNT: usize = EN_PASSANT_KEYS + 8;

static KEYS: [u64; KEY_COUNT] = build_keys();

const fn build_keys() -> [u64; KEY_COUNT] {
    let mut keys = [0u64; KEY_COUNT];
    let mut state = SEED;
    let mut i = 0;
    while i < KEY_COUNT {
        // splitmix64
        state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        keys[i] = z ^ (z >> 31);
        i += 1;
    }
    keys
}

#[inline]
fn piece_square_key(color: Color, kind: PieceKind, square: Square) -> u64 {
    KEYS[(color.index() * 6 + kind.index()) * 64 + square as usize]
}

/// Key identifying a position for repetition purposes.
///
/// Covers placement, side to move and castling rights. The en-passant file
/// only counts when a side-to-move pawn stands ready to capture there, so a
/// double push that nobody can answer does not make the position distinct.
/// Clocks are ignored.
pub fn position_key(game_state: &GameState) -> u64 {
    let mut key = 0u64;

    for color in [Color::White, Color::Black] {
        for kind in PieceKind::ALL {
            let mut bb = game_state.bitboard(color, kind);
            while bb != 0 {
                key ^= piece_square_key(color, kind, bb.trailing_zeros() as Square);
                bb &= bb - 1;
            }
        }
    }

    if game_state.side_to_move == Color::Black {
        key ^= KEYS[SIDE_KEY];
    }

    key ^= KEYS[CASTLING_KEYS + (game_state.castling_rights & 0x0F) as usize];

    if let Some(target) = game_state.en_passant_square {
        let mover = game_state.side_to_move;
        // Pawns that attack the target are those the target would attack
        // if it held an enemy pawn.
        let capturers =
            pawn_attacks(mover.opposite(), target) & game_state.bitboard(mover, PieceKind::Pawn);
        if capturers != 0 {
            key ^= KEYS[EN_PASSANT_KEYS + file_of(target) as usize];
        }
    }

    key
}
