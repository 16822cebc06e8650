//! Crate root module declarations for the Plum Rules chess engine.
//!
//! This file exposes the rules subsystems (game state, attack tables, move
//! generation, the `Game` surface, and notation helpers) so binaries, tests,
//! and external collaborators can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
    pub mod zobrist;
}

pub mod moves {
    pub mod chess_move;
    pub mod leaper_tables;
    pub mod piece_movement;
    pub mod sliding_rays;
}

pub mod move_generation {
    pub mod game_status;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod move_generator;
    pub mod perft;
}

pub mod game {
    pub mod chess_game;
    pub mod snapshot;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
    pub mod san;
}

pub use errors::{ChessError, ChessResult};
pub use game::chess_game::Game;
