//! Position representation.
//!
//! `GameState` is the central model for the engine: one immutable value per
//! ply. It stores piece bitboards, occupancy caches, side to move, castling
//! rights, the en-passant target and both clocks. Move application always
//! produces a fresh `GameState`; history lives in `Game`.

use crate::errors::ChessResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    // --- Bitboard representation ---
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    // Occupancy caches, always derived from `pieces`.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl GameState {
    /// Empty board, white to move. Not a valid position until kings are placed.
    #[inline]
    pub(crate) fn new_empty() -> Self {
        Self::default()
    }

    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// `None` for an empty square or an index outside the board.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = square_mask(square);
        if self.occupancy_all & mask == 0 {
            return None;
        }
        for color in [Color::White, Color::Black] {
            if let Some(kind) = self.kind_on(color, square) {
                return Some(Piece::new(kind, color));
            }
        }
        None
    }

    /// Kind of the `color` piece on `square`, if any.
    pub fn kind_on(&self, color: Color, square: Square) -> Option<PieceKind> {
        let mask = square_mask(square);
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces[color.index()][kind.index()] & mask != 0)
    }

    #[inline]
    pub fn bitboard(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn count(&self, color: Color, kind: PieceKind) -> u32 {
        self.bitboard(color, kind).count_ones()
    }

    #[inline]
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.castling_rights & castling_right(color, side) != 0
    }

    /// Square of `color`'s king.
    ///
    /// Every constructed position has exactly one king per color, so a
    /// missing or doubled king means move application is broken.
    pub fn king_square(&self, color: Color) -> Square {
        let kings = self.bitboard(color, PieceKind::King);
        assert!(
            kings.count_ones() == 1,
            "corrupt position: {color:?} has {} kings",
            kings.count_ones()
        );
        kings.trailing_zeros() as Square
    }

    pub(crate) fn put_piece(&mut self, piece: Piece, square: Square) {
        let mask = square_mask(square);
        self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
        self.occupancy_all |= mask;
    }

    pub(crate) fn remove_piece(&mut self, piece: Piece, square: Square) {
        let mask = !square_mask(square);
        self.pieces[piece.color.index()][piece.kind.index()] &= mask;
        self.occupancy_by_color[piece.color.index()] &= mask;
        self.occupancy_all &= mask;
    }

    pub(crate) fn recalc_occupancy(&mut self) {
        for color in [Color::White, Color::Black] {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::White.index()]
            | self.occupancy_by_color[Color::Black.index()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("square should parse")
    }

    #[test]
    fn make_new_game() {
        let dut = GameState::new_game();
        assert_eq!(dut.get_fen(), STARTING_POSITION_FEN);
        assert_eq!(dut.side_to_move, Color::White);
        assert_eq!(dut.castling_rights, CASTLE_ALL);
        assert_eq!(dut.en_passant_square, None);
        assert_eq!(dut.halfmove_clock, 0);
        assert_eq!(dut.fullmove_number, 1);
        assert_eq!(dut.occupancy_all.count_ones(), 32);
    }

    #[test]
    fn piece_queries_on_start_position() {
        let dut = GameState::new_game();
        assert_eq!(
            dut.piece_at(sq("e1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            dut.piece_at(sq("d8")),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(dut.piece_at(sq("e4")), None);
        assert_eq!(dut.kind_on(Color::Black, sq("e2")), None);
        assert_eq!(dut.count(Color::White, PieceKind::Pawn), 8);
        assert_eq!(dut.king_square(Color::Black), sq("e8"));
        assert!(dut.can_castle(Color::Black, CastleSide::Queenside));
    }

    #[test]
    fn off_board_indices_read_as_empty() {
        let dut = GameState::new_game();
        for square in [64u8, 100, u8::MAX] {
            assert_eq!(dut.piece_at(square), None);
            assert_eq!(dut.kind_on(Color::White, square), None);
        }
    }

    #[test]
    fn put_and_remove_keep_occupancy_in_sync() {
        let mut dut = GameState::new_empty();
        let knight = Piece::new(PieceKind::Knight, Color::Black);
        dut.put_piece(knight, sq("c6"));
        assert_eq!(dut.piece_at(sq("c6")), Some(knight));
        assert_eq!(dut.occupancy_by_color[Color::Black.index()], 1u64 << sq("c6"));

        dut.remove_piece(knight, sq("c6"));
        assert_eq!(dut.occupancy_all, 0);

        let mut rebuilt = GameState::new_game();
        let expected = rebuilt.clone();
        rebuilt.occupancy_all = 0;
        rebuilt.recalc_occupancy();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    #[should_panic(expected = "corrupt position")]
    fn missing_king_is_a_bug_not_an_error() {
        GameState::new_empty().king_square(Color::White);
    }
}
