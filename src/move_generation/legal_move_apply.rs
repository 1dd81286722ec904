//! Move application.
//!
//! `make_move` performs the board surgery and rule-state bookkeeping for a
//! move already known to be pseudo-legal; the generator uses it on scratch
//! copies to filter out self-check. `apply_move` is the public, validating
//! entry point.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{kingside_path, queenside_path};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_attacked;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::move_generation::piece_destinations::destinations;
use crate::moves::chess_move::{Move, MoveKind};

/// Applies `mv` if it is legal in `state`, returning the successor position.
pub fn apply_move(state: &GameState, mv: Move) -> ChessResult<GameState> {
    let mv = mv.with_default_promotion();
    let legal = legal_moves(state)?;
    if legal.contains(&mv) {
        return make_move(state, mv);
    }
    Err(ChessError::illegal(mv, explain_illegal(state, mv)))
}

/// Applies a pseudo-legal move without checking that it is legal.
pub(crate) fn make_move(state: &GameState, mv: Move) -> ChessResult<GameState> {
    let moving = state.board.get(mv.from).ok_or_else(|| {
        ChessError::InvariantViolation(format!("no piece on {} for move {mv}", mv.from))
    })?;
    let color = moving.color;
    let captured = match mv.kind {
        MoveKind::EnPassant => true,
        _ => !state.board.is_empty(mv.to),
    };

    let mut board = state.board.relocate(mv.from, mv.to);

    match mv.kind {
        MoveKind::EnPassant => {
            // The captured pawn stands beside the origin, behind the target.
            let victim = Square::from_file_rank(mv.to.file(), mv.from.rank()).ok_or_else(|| {
                ChessError::InvariantViolation(format!("no en-passant victim square for {mv}"))
            })?;
            board = board.set(victim, None);
        }
        MoveKind::CastleKingside => {
            let path = kingside_path(color);
            board = board.relocate(path.rook_from, path.rook_to);
        }
        MoveKind::CastleQueenside => {
            let path = queenside_path(color);
            board = board.relocate(path.rook_from, path.rook_to);
        }
        MoveKind::Promotion => {
            let kind = mv.promotion.unwrap_or(PieceKind::Queen);
            board = board.set(mv.to, Some(Piece::new(color, kind)));
        }
        MoveKind::Normal | MoveKind::Capture => {}
    }

    let mut castling_rights = state.castling_rights;
    if moving.kind == PieceKind::King {
        castling_rights.clear_color(color);
    }
    // A rook leaving its corner, or being captured there, ends that right.
    castling_rights.clear_rook_square(mv.from);
    castling_rights.clear_rook_square(mv.to);

    let en_passant_target = if moving.kind == PieceKind::Pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2 {
        Square::from_file_rank(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2)
    } else {
        None
    };

    let halfmove_clock = if moving.kind == PieceKind::Pawn || captured {
        0
    } else {
        state.halfmove_clock.saturating_add(1)
    };
    let fullmove_number = match color {
        Color::Black => state.fullmove_number.saturating_add(1),
        Color::White => state.fullmove_number,
    };

    Ok(GameState {
        board,
        turn: color.opposite(),
        castling_rights,
        en_passant_target,
        halfmove_clock,
        fullmove_number,
    })
}

fn explain_illegal(state: &GameState, mv: Move) -> String {
    let Some(piece) = state.board.get(mv.from) else {
        return format!("no piece on {}", mv.from);
    };
    if piece.color != state.turn {
        return format!("the piece on {} belongs to {}", mv.from, piece.color);
    }
    if mv.is_castle() {
        return "castling is not allowed here".to_owned();
    }
    let reachable = destinations(state, piece.kind, piece.color, mv.from) & mv.to.mask() != 0;
    if !reachable {
        return format!("a {:?} on {} cannot reach {}", piece.kind, mv.from, mv.to).to_lowercase();
    }
    let leaves_check = make_move(state, mv)
        .and_then(|next| is_king_attacked(&next.board, piece.color))
        .unwrap_or(false);
    if leaves_check {
        return "it would leave the king in check".to_owned();
    }
    "the move does not match the position".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    fn play(state: &GameState, text: &str) -> GameState {
        let mv = Move::parse(text, state).expect("test move should parse");
        apply_move(state, mv).expect("test move should be legal")
    }

    #[test]
    fn double_advance_sets_and_next_move_clears_en_passant_target() {
        let after_e4 = play(&GameState::new_game(), "e2e4");
        assert_eq!(after_e4.en_passant_target, Some(sq("e3")));
        assert_eq!(after_e4.turn, Color::Black);
        assert_eq!(after_e4.halfmove_clock, 0);

        let after_nf6 = play(&after_e4, "g8f6");
        assert_eq!(after_nf6.en_passant_target, None);
        assert_eq!(after_nf6.halfmove_clock, 1);
        assert_eq!(after_nf6.fullmove_number, 2);
    }

    #[test]
    fn en_passant_removes_pawn_behind_target() {
        let state = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let next = play(&state, "e5d6");
        assert_eq!(next.board.get(sq("d6")), Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_eq!(next.board.get(sq("d5")), None);
        assert_eq!(next.board.get(sq("e5")), None);
        assert_eq!(next.board.occupancy(Color::Black), sq("e8").mask());
    }

    #[test]
    fn castling_moves_the_rook_and_clears_rights() {
        let state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").expect("FEN should parse");
        let next = play(&state, "e1c1");
        assert_eq!(next.board.get(sq("c1")), Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(next.board.get(sq("d1")), Some(Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(next.board.get(sq("a1")), None);
        assert!(!next.castling_rights.white_kingside && !next.castling_rights.white_queenside);
        assert!(next.castling_rights.black_kingside && next.castling_rights.black_queenside);
        assert_eq!(next.halfmove_clock, 4);
    }

    #[test]
    fn capturing_a_rook_at_home_clears_that_right() {
        let state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let next = play(&state, "h1h8");
        assert!(!next.castling_rights.black_kingside);
        assert!(!next.castling_rights.white_kingside);
        assert!(next.castling_rights.black_queenside && next.castling_rights.white_queenside);
        assert_eq!(next.halfmove_clock, 0);
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let state = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let bare = play(&state, "a7a8");
        assert_eq!(bare.board.get(sq("a8")), Some(Piece::new(Color::White, PieceKind::Queen)));
        let knight = play(&state, "a7a8n");
        assert_eq!(knight.board.get(sq("a8")), Some(Piece::new(Color::White, PieceKind::Knight)));
    }

    #[test]
    fn illegal_moves_are_rejected_with_reasons() {
        let start = GameState::new_game();
        let reject = |text: &str| match apply_move(&start, Move::parse(text, &start).expect("should parse")) {
            Err(ChessError::IllegalMove { reason, .. }) => reason,
            other => panic!("{text} should be illegal, got {other:?}"),
        };
        assert_eq!(reject("e3e4"), "no piece on e3");
        assert_eq!(reject("e7e5"), "the piece on e7 belongs to black");
        assert_eq!(reject("e2e5"), "a pawn on e2 cannot reach e5");
        assert_eq!(reject("e1g1"), "castling is not allowed here");

        let pinned = GameState::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN should parse");
        let mv = Move::parse("e2d3", &pinned).expect("should parse");
        assert!(matches!(
            apply_move(&pinned, mv),
            Err(ChessError::IllegalMove { reason, .. }) if reason == "it would leave the king in check"
        ));
    }

    #[test]
    fn tag_mismatch_is_illegal() {
        let start = GameState::new_game();
        let wrong = Move::new(sq("e2"), sq("e4"), MoveKind::Capture);
        assert!(matches!(apply_move(&start, wrong), Err(ChessError::IllegalMove { .. })));
    }
}
