//! Scripted games through the public API.

use plum_duel::errors::ChessError;
use plum_duel::game::game::Game;
use plum_duel::game::game_status::{propose_move, status, GameStatus};
use plum_duel::game_state::chess_types::{Color, Piece, PieceKind};
use plum_duel::game_state::game_state::GameState;
use plum_duel::move_generation::legal_move_generator::legal_moves;
use plum_duel::moves::chess_move::{Move, MoveKind};
use plum_duel::utils::algebraic::algebraic_to_square;

fn play_all(game: &mut Game, moves: &[&str]) {
    for text in moves {
        game.propose(text).unwrap_or_else(|err| panic!("{text} should be legal: {err}"));
    }
}

#[test]
fn scholars_mate() {
    let mut game = Game::new();
    play_all(&mut game, &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"]);
    assert_eq!(game.status(), Ok(GameStatus::Checkmate { winner: Color::White }));
    assert_eq!(game.turn(), Color::Black);
    assert!(matches!(game.propose("e8f7"), Err(ChessError::IllegalMove { .. })));
}

#[test]
fn fools_mate_through_the_stateless_api() {
    let mut state = GameState::new_game();
    for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        let mv = Move::parse(text, &state).expect("scripted move should parse");
        state = propose_move(&state, mv).expect("scripted move should be legal");
    }
    assert_eq!(status(&state), Ok(GameStatus::Checkmate { winner: Color::Black }));
    assert_eq!(legal_moves(&state).map(|moves| moves.len()), Ok(0));
}

#[test]
fn en_passant_window_lasts_one_move() {
    let mut game = Game::new();
    play_all(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    let d6 = algebraic_to_square("d6").expect("square");
    assert_eq!(game.state().en_passant_target, Some(d6));

    // Declining the capture closes the window.
    let mut declined = game.clone();
    play_all(&mut declined, &["g1f3", "a6a5"]);
    assert!(declined.propose("e5d6").is_err());

    let capture = game.propose("e5d6").expect("en passant should be legal");
    assert_eq!(capture.kind, MoveKind::EnPassant);
    let d5 = algebraic_to_square("d5").expect("square");
    assert_eq!(game.state().board.get(d5), None);
    assert_eq!(game.state().board.get(d6), Some(Piece::new(Color::White, PieceKind::Pawn)));
}

#[test]
fn castling_both_sides_in_a_real_game() {
    let mut game = Game::new();
    play_all(
        &mut game,
        &["e2e4", "d7d5", "g1f3", "c8g4", "f1e2", "b8c6", "e1g1", "d8d7", "d2d3", "e8c8"],
    );
    let board = &game.state().board;
    let at = |name: &str| board.get(algebraic_to_square(name).expect("square"));
    assert_eq!(at("g1"), Some(Piece::new(Color::White, PieceKind::King)));
    assert_eq!(at("f1"), Some(Piece::new(Color::White, PieceKind::Rook)));
    assert_eq!(at("c8"), Some(Piece::new(Color::Black, PieceKind::King)));
    assert_eq!(at("d8"), Some(Piece::new(Color::Black, PieceKind::Rook)));
    assert!(!game.state().castling_rights.white_kingside);
    assert!(!game.state().castling_rights.black_queenside);
}

#[test]
fn fen_snapshot_follows_the_game() {
    let mut game = Game::new();
    play_all(&mut game, &["e2e4", "c7c5", "g1f3"]);
    assert_eq!(
        game.state().to_fen(),
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
    );
}

#[test]
fn every_legal_move_round_trips_through_text() {
    let fens = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1",
    ];
    for fen in fens {
        let state = GameState::from_fen(fen).expect("FEN should parse");
        for mv in legal_moves(&state).expect("valid position") {
            assert_eq!(Move::parse(&mv.to_string(), &state), Ok(mv), "{mv} in {fen}");
        }
    }
}
