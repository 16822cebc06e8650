use plum_rules::errors::ChessError;
use plum_rules::game_state::chess_rules::STARTING_POSITION_FEN;
use plum_rules::game_state::chess_types::*;
use plum_rules::game_state::game_state::GameState;
use plum_rules::move_generation::game_status::{
    game_status, is_check, is_checkmate, is_stalemate, DrawReason, GameStatus,
};
use plum_rules::move_generation::legal_move_apply::apply_move;
use plum_rules::move_generation::legal_move_checks::is_square_attacked;
use plum_rules::move_generation::legal_move_generator::{find_legal_move, legal_moves};
use plum_rules::moves::chess_move::ChessMove;
use plum_rules::utils::algebraic::algebraic_to_square;
use plum_rules::utils::long_algebraic::long_algebraic_to_move;

fn sq(name: &str) -> Square {
    algebraic_to_square(name).expect("valid square")
}

fn play(state: &GameState, moves: &[&str]) -> GameState {
    moves.iter().fold(state.clone(), |state, text| {
        let mv = long_algebraic_to_move(text, &state).expect("legal move");
        apply_move(&state, &mv).expect("legal move applies")
    })
}

#[test]
fn starting_position_shape() {
    let state = GameState::new_game();
    assert_eq!(legal_moves(&state, None).len(), 20);
    assert_eq!(state.get_fen(), STARTING_POSITION_FEN);
    assert_eq!(state.side_to_move, Color::White);
    assert_eq!(state.castling_rights, CASTLE_ALL);
    assert_eq!(state.en_passant_square, None);
    assert_eq!((state.halfmove_clock, state.fullmove_number), (0, 1));
}

#[test]
fn malformed_fen_is_invalid_notation() {
    for fen in [
        "",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
        "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkz - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
    ] {
        assert!(
            matches!(GameState::from_fen(fen), Err(ChessError::InvalidNotation(_))),
            "accepted {fen:?}"
        );
    }
}

#[test]
fn move_outside_legal_set_is_rejected() {
    let state = GameState::new_game();
    let bogus = ChessMove::quiet(sq("e2"), sq("e5"), PieceKind::Pawn);
    assert!(matches!(
        apply_move(&state, &bogus),
        Err(ChessError::IllegalMove(_))
    ));
    assert!(matches!(
        find_legal_move(&state, sq("e1"), sq("e2"), None),
        Err(ChessError::IllegalMove(_))
    ));
    assert_eq!(state, GameState::new_game());
}

#[test]
fn double_push_target_lives_for_one_ply() {
    let state = play(&GameState::new_game(), &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(state.en_passant_square, Some(sq("d6")));

    let captured = play(&state, &["e5d6"]);
    assert_eq!(captured.piece_at(sq("d5")), None);
    assert_eq!(
        captured.piece_at(sq("d6")),
        Some(Piece::new(PieceKind::Pawn, Color::White))
    );

    let waited = play(&state, &["h2h3", "h7h6"]);
    assert_eq!(waited.en_passant_square, None);
    assert!(matches!(
        find_legal_move(&waited, sq("e5"), sq("d6"), None),
        Err(ChessError::IllegalMove(_))
    ));
}

#[test]
fn scholars_mate() {
    let state = play(
        &GameState::new_game(),
        &["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6", "h5f7"],
    );
    assert!(is_check(&state));
    assert!(is_checkmate(&state));
    assert!(legal_moves(&state, None).is_empty());
    assert_eq!(
        game_status(&state),
        GameStatus::Checkmate {
            winner: Color::White
        }
    );
}

#[test]
fn queen_and_king_stalemate() {
    let state = GameState::from_fen("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1").expect("FEN");
    assert!(is_stalemate(&state));
    assert!(!is_check(&state));
    assert_eq!(game_status(&state), GameStatus::Stalemate);
}

#[test]
fn lone_kings_are_insufficient_material() {
    let state = GameState::from_fen("8/8/8/8/8/8/8/k6K w - - 0 1").expect("FEN");
    assert_eq!(
        game_status(&state),
        GameStatus::Draw(DrawReason::InsufficientMaterial)
    );
}

#[test]
fn halfmove_clock_and_fifty_move_draw() {
    let state = GameState::from_fen("r3k3/8/8/8/8/8/4P3/R3K3 w - - 99 60").expect("FEN");

    let quiet = play(&state, &["a1a2"]);
    assert_eq!(quiet.halfmove_clock, 100);
    assert_eq!(game_status(&quiet), GameStatus::Draw(DrawReason::FiftyMoveRule));

    assert_eq!(play(&state, &["e2e4"]).halfmove_clock, 0);
    assert_eq!(play(&state, &["a1a8"]).halfmove_clock, 0);
}

#[test]
fn castling_moves_both_pieces_and_clears_rights() {
    let state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN");

    let castled = play(&state, &["e1g1"]);
    assert_eq!(
        castled.piece_at(sq("g1")),
        Some(Piece::new(PieceKind::King, Color::White))
    );
    assert_eq!(
        castled.piece_at(sq("f1")),
        Some(Piece::new(PieceKind::Rook, Color::White))
    );
    assert_eq!(castled.piece_at(sq("h1")), None);
    assert!(!castled.can_castle(Color::White, CastleSide::Kingside));
    assert!(!castled.can_castle(Color::White, CastleSide::Queenside));
    assert!(castled.can_castle(Color::Black, CastleSide::Kingside));

    let long = play(&state, &["e1c1"]);
    assert_eq!(
        long.piece_at(sq("d1")),
        Some(Piece::new(PieceKind::Rook, Color::White))
    );
}

#[test]
fn castling_through_or_into_attack_is_illegal() {
    // f1 is covered.
    let through = GameState::from_fen("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1").expect("FEN");
    assert!(is_square_attacked(&through, sq("f1"), Color::Black));
    assert!(matches!(
        find_legal_move(&through, sq("e1"), sq("g1"), None),
        Err(ChessError::IllegalMove(_))
    ));
    assert!(find_legal_move(&through, sq("e1"), sq("c1"), None).is_ok());

    // g1 is covered.
    let into = GameState::from_fen("r3k2r/8/8/8/8/8/6r1/R3K2R w KQkq - 0 1").expect("FEN");
    assert!(matches!(
        find_legal_move(&into, sq("e1"), sq("g1"), None),
        Err(ChessError::IllegalMove(_))
    ));
}

#[test]
fn promotion_requires_a_piece() {
    let state = GameState::from_fen("8/P7/8/8/8/8/8/K6k w - - 0 1").expect("FEN");
    assert!(matches!(
        find_legal_move(&state, sq("a7"), sq("a8"), None),
        Err(ChessError::IllegalMove(_))
    ));

    let mv = find_legal_move(&state, sq("a7"), sq("a8"), Some(PieceKind::Knight)).expect("legal");
    let promoted = apply_move(&state, &mv).expect("applies");
    assert_eq!(
        promoted.piece_at(sq("a8")),
        Some(Piece::new(PieceKind::Knight, Color::White))
    );
    assert_eq!(promoted.count(Color::White, PieceKind::Pawn), 0);
}

#[test]
fn legal_moves_never_leave_the_mover_in_check() {
    let state = GameState::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .expect("FEN");
    for mv in legal_moves(&state, None) {
        let after = apply_move(&state, &mv).expect("generated moves apply");
        let king = after.king_square(Color::White);
        assert!(!is_square_attacked(&after, king, Color::Black), "{mv:?}");
    }
}

#[test]
fn queries_are_shareable_across_threads() {
    let state = GameState::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .expect("FEN");
    let expected = legal_moves(&state, None);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| legal_moves(&state, None)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("worker"), expected);
        }
    });
}
