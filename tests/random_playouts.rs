//! Seeded random games checking engine invariants over many positions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use plum_duel::game::game_status::{status, GameStatus};
use plum_duel::game_state::chess_types::{Color, PieceKind};
use plum_duel::game_state::game_state::GameState;
use plum_duel::move_generation::legal_move_apply::apply_move;
use plum_duel::move_generation::legal_move_checks::is_king_attacked;
use plum_duel::move_generation::legal_move_generator::legal_moves;
use plum_duel::moves::chess_move::Move;

const GAMES: u64 = 8;
const MAX_PLIES: usize = 100;

#[test]
fn random_games_preserve_invariants() {
    for seed in 0..GAMES {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = GameState::new_game();

        for ply in 0..MAX_PLIES {
            let moves = legal_moves(&state).expect("reachable positions are valid");
            let current = status(&state).expect("status");

            if moves.is_empty() {
                assert!(current.is_terminal(), "seed {seed} ply {ply}: no moves but {current:?}");
                break;
            }
            assert!(matches!(current, GameStatus::InProgress { .. }));

            for mv in &moves {
                let next = apply_move(&state, *mv).expect("listed moves apply");
                assert_eq!(
                    is_king_attacked(&next.board, state.turn),
                    Ok(false),
                    "seed {seed}: {mv} leaves the king attacked"
                );
                assert_eq!(Move::parse(&mv.to_string(), &state), Ok(*mv));
            }

            let mv = moves[rng.random_range(0..moves.len())];
            let next = apply_move(&state, mv).expect("chosen move applies");

            assert_eq!(next.turn, state.turn.opposite());
            assert!(next.validate().is_ok(), "seed {seed} ply {ply}: {}", next.to_fen());
            for color in Color::ALL {
                assert_eq!(next.board.pieces_of(color, PieceKind::King).count_ones(), 1);
            }
            assert_eq!(GameState::from_fen(&next.to_fen()), Ok(next), "FEN round trip after {mv}");

            state = next;
        }
    }
}
