//! Game: a position plus its history.
//!
//! `Game` is the surface UI and AI collaborators drive. Squares and moves
//! come in as text, results go out as serializable records, and every
//! failed call leaves the game exactly as it was.

use tracing::{debug, warn};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{DrawRules, REPETITION_COUNT};
use crate::game_state::zobrist::position_key;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::game::snapshot::{GameSnapshot, MoveRecord, MoveRequest};
use crate::move_generation::game_status::{
    is_check, position_status, DrawReason, GameStatus,
};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::{annotate, find_legal_move, legal_moves};
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};
use crate::utils::san::{move_to_san, san_to_move};

#[derive(Debug, Clone)]
struct HistoryEntry {
    undo: UndoState,
    record: MoveRecord,
}

#[derive(Debug, Clone)]
pub struct Game {
    initial: GameState,
    current: GameState,
    history: Vec<HistoryEntry>,
    /// `position_key` of the initial position and of every position since.
    position_keys: Vec<u64>,
    rules: DrawRules,
}

impl Default for Game {
    fn default() -> Self {
        Self::from_state(GameState::new_game(), DrawRules::default())
    }
}

impl Game {
    /// Standard starting position, every draw rule enabled.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Self::with_rules(Some(fen), DrawRules::default())
    }

    /// Start from `fen` (or the standard position) reporting only the
    /// automatic draws `rules` enables.
    pub fn with_rules(fen: Option<&str>, rules: DrawRules) -> ChessResult<Self> {
        let state = match fen {
            Some(fen) => GameState::from_fen(fen)?,
            None => GameState::new_game(),
        };
        Ok(Self::from_state(state, rules))
    }

    fn from_state(state: GameState, rules: DrawRules) -> Self {
        Self {
            position_keys: vec![position_key(&state)],
            initial: state.clone(),
            current: state,
            history: Vec::new(),
            rules,
        }
    }

    /// Rebuild a game by replaying SAN moves from `initial_fen` (or the
    /// standard position).
    pub fn replay<S: AsRef<str>>(initial_fen: Option<&str>, sans: &[S]) -> ChessResult<Self> {
        let mut game = Self::with_rules(initial_fen, DrawRules::default())?;
        for san in sans {
            game.play_san(san.as_ref())?;
        }
        Ok(game)
    }

    // --- Queries ---

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.current
    }

    #[inline]
    pub fn initial_state(&self) -> &GameState {
        &self.initial
    }

    #[inline]
    pub fn rules(&self) -> DrawRules {
        self.rules
    }

    #[inline]
    pub fn fen(&self) -> String {
        self.current.get_fen()
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.current.side_to_move
    }

    pub fn status(&self) -> GameStatus {
        let status = position_status(&self.current, &self.rules);
        if status == GameStatus::Ongoing
            && self.rules.threefold_repetition
            && self.repetition_count() >= REPETITION_COUNT
        {
            return GameStatus::Draw(DrawReason::ThreefoldRepetition);
        }
        status
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.status().is_over()
    }

    /// `"1-0"`, `"0-1"`, `"1/2-1/2"` or `"*"` while the game is running.
    #[inline]
    pub fn result(&self) -> &'static str {
        self.status().result_token()
    }

    /// Times the current position has occurred in this game, itself included.
    pub fn repetition_count(&self) -> usize {
        let current = self.position_keys[self.position_keys.len() - 1];
        self.position_keys
            .iter()
            .filter(|&&key| key == current)
            .count()
    }

    pub fn history(&self) -> impl Iterator<Item = &MoveRecord> + '_ {
        self.history.iter().map(|entry| &entry.record)
    }

    pub fn moves(&self) -> Vec<ChessMove> {
        self.history.iter().map(|entry| entry.undo.mv).collect()
    }

    pub fn san_history(&self) -> Vec<String> {
        self.history().map(|record| record.san.clone()).collect()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(
            &self.current,
            self.status(),
            is_check(&self.current),
            self.history().cloned().collect(),
        )
    }

    /// Destination square names for the piece on `square`. Empty for an
    /// unparsable square, an empty square or an opponent piece.
    pub fn legal_destinations(&self, square: &str) -> Vec<String> {
        let Ok(from) = algebraic_to_square(square) else {
            return Vec::new();
        };
        let mut destinations: Vec<String> = Vec::new();
        for mv in legal_moves(&self.current, Some(from)) {
            let name = square_to_algebraic(mv.to);
            // Promotions repeat a destination once per piece kind.
            if destinations.last() != Some(&name) {
                destinations.push(name);
            }
        }
        destinations
    }

    pub fn all_legal_moves(&self) -> Vec<MoveRequest> {
        legal_moves(&self.current, None)
            .iter()
            .map(MoveRequest::from)
            .collect()
    }

    /// Would `try_move(from, to, promotion)` succeed? A missing promotion
    /// matches any promotion kind here.
    pub fn is_valid_move(&self, from: &str, to: &str, promotion: Option<PieceKind>) -> bool {
        let (Ok(from), Ok(to)) = (algebraic_to_square(from), algebraic_to_square(to)) else {
            return false;
        };
        legal_moves(&self.current, Some(from))
            .iter()
            .any(|mv| mv.to == to && (promotion.is_none() || mv.promotion == promotion))
    }

    // --- Mutations ---

    pub fn try_move(
        &mut self,
        from: &str,
        to: &str,
        promotion: Option<PieceKind>,
    ) -> ChessResult<MoveRecord> {
        let resolved = algebraic_to_square(from)
            .and_then(|from| Ok((from, algebraic_to_square(to)?)))
            .and_then(|(from, to)| find_legal_move(&self.current, from, to, promotion));
        match resolved {
            Ok(mv) => self.play_move(&mv),
            Err(err) => {
                warn!(from, to, ?promotion, %err, "move rejected");
                Err(err)
            }
        }
    }

    pub fn play_san(&mut self, san: &str) -> ChessResult<MoveRecord> {
        match san_to_move(&self.current, san) {
            Ok(mv) => self.play_move(&mv),
            Err(err) => {
                warn!(san, %err, "move rejected");
                Err(err)
            }
        }
    }

    /// Play a move produced by the generator for the current position.
    pub fn play_move(&mut self, mv: &ChessMove) -> ChessResult<MoveRecord> {
        let next = match apply_move(&self.current, mv) {
            Ok(next) => next,
            Err(err) => {
                warn!(?mv, %err, "move rejected");
                return Err(err);
            }
        };
        let san = move_to_san(&self.current, mv);
        let annotations = annotate(&next);

        let record = MoveRecord {
            from: square_to_algebraic(mv.from),
            to: square_to_algebraic(mv.to),
            piece: mv.piece,
            color: self.current.side_to_move,
            captured: mv.captured,
            promotion: mv.promotion,
            castling: mv.castle_side(),
            en_passant: mv.is_en_passant(),
            check: annotations.gives_check,
            checkmate: annotations.gives_checkmate,
            san,
            fen: next.get_fen(),
        };
        debug!(san = %record.san, fen = %record.fen, "move applied");

        let previous = std::mem::replace(&mut self.current, next);
        self.position_keys.push(position_key(&self.current));
        self.history.push(HistoryEntry {
            undo: UndoState { mv: *mv, previous },
            record: record.clone(),
        });
        Ok(record)
    }

    /// Take back the last move, restoring the exact previous position.
    pub fn undo(&mut self) -> ChessResult<ChessMove> {
        let Some(entry) = self.history.pop() else {
            warn!("undo with empty history");
            return Err(ChessError::NoHistory);
        };
        self.position_keys.pop();
        self.current = entry.undo.previous;
        debug!(san = %entry.record.san, "move undone");
        Ok(entry.undo.mv)
    }

    /// Back to the standard starting position with an empty history.
    pub fn reset(&mut self) {
        *self = Self::from_state(GameState::new_game(), self.rules);
        debug!("game reset");
    }

    /// Replace the game with the position `fen` and an empty history.
    /// The game is unchanged when `fen` does not parse.
    pub fn load_fen(&mut self, fen: &str) -> ChessResult<()> {
        match GameState::from_fen(fen) {
            Ok(state) => {
                *self = Self::from_state(state, self.rules);
                debug!(fen, "position loaded");
                Ok(())
            }
            Err(err) => {
                warn!(fen, %err, "FEN rejected");
                Err(err)
            }
        }
    }
}
