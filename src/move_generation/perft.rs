use crate::errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::{Move, MoveKind};

/// Leaf tallies of a perft walk. Captures include en-passant and capturing
/// promotions; checks include checkmates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(game_state: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in legal_moves(game_state)? {
        perft_recurse(game_state, mv, depth, 1, &mut total)?;
    }
    Ok(total)
}

/// Node count below each root move, for comparing against another engine.
pub fn perft_divide(game_state: &GameState, depth: u8) -> ChessResult<Vec<(Move, usize)>> {
    let mut out = Vec::new();
    if depth == 0 {
        return Ok(out);
    }
    for mv in legal_moves(game_state)? {
        let mut counts = PerftCounts::default();
        perft_recurse(game_state, mv, depth, 1, &mut counts)?;
        out.push((mv, counts.nodes));
    }
    Ok(out)
}

fn perft_recurse(
    parent: &GameState,
    mv: Move,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> ChessResult<()> {
    let child = make_move(parent, mv)?;

    if current_depth == search_depth {
        let mut leaf = PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
        if mv.kind == MoveKind::EnPassant || !parent.board.is_empty(mv.to) {
            leaf.captures = 1;
        }
        match mv.kind {
            MoveKind::EnPassant => leaf.en_passant = 1,
            MoveKind::CastleKingside | MoveKind::CastleQueenside => leaf.castles = 1,
            MoveKind::Promotion => leaf.promotions = 1,
            MoveKind::Normal | MoveKind::Capture => {}
        }
        if is_in_check(&child)? {
            leaf.checks = 1;
            if legal_moves(&child)?.is_empty() {
                leaf.checkmates = 1;
            }
        }
        counts.merge(leaf);
        return Ok(());
    }

    for next in legal_moves(&child)? {
        perft_recurse(&child, next, search_depth, current_depth + 1, counts)?;
    }
    Ok(())
}

// Reference counts from https://www.chessprogramming.org/Perft_Results
#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn counts(fen: &str, depth: u8) -> PerftCounts {
        let game = GameState::from_fen(fen).expect("reference FEN should parse");
        perft(&game, depth).expect("perft should run")
    }

    #[test]
    fn depth_zero_counts_single_node() {
        assert_eq!(counts(crate::game_state::chess_rules::STARTING_POSITION_FEN, 0).nodes, 1);
    }

    #[test]
    fn perft_position_1() {
        let start = GameState::new_game();
        assert_eq!(perft(&start, 1).map(|c| c.nodes), Ok(20));
        assert_eq!(perft(&start, 2).map(|c| c.nodes), Ok(400));
        assert_eq!(
            perft(&start, 3),
            Ok(PerftCounts {
                nodes: 8902,
                captures: 34,
                checks: 12,
                ..PerftCounts::default()
            })
        );
    }

    #[test]
    fn perft_position_2() {
        assert_eq!(
            counts(KIWIPETE, 1),
            PerftCounts {
                nodes: 48,
                captures: 8,
                castles: 2,
                ..PerftCounts::default()
            }
        );
        assert_eq!(
            counts(KIWIPETE, 2),
            PerftCounts {
                nodes: 2039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                checks: 3,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn perft_position_3() {
        assert_eq!(counts(POSITION_3, 1).nodes, 14);
        assert_eq!(counts(POSITION_3, 2).nodes, 191);
        let depth_3 = counts(POSITION_3, 3);
        assert_eq!(depth_3.nodes, 2812);
        assert_eq!(depth_3.captures, 209);
        assert_eq!(depth_3.en_passant, 2);
        assert_eq!(depth_3.checks, 267);
    }

    #[test]
    fn perft_position_4() {
        assert_eq!(counts(POSITION_4, 1).nodes, 6);
        assert_eq!(
            counts(POSITION_4, 2),
            PerftCounts {
                nodes: 264,
                captures: 87,
                castles: 6,
                promotions: 48,
                checks: 10,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn perft_position_5() {
        assert_eq!(counts(POSITION_5, 1).nodes, 44);
        assert_eq!(counts(POSITION_5, 2).nodes, 1486);
    }

    #[test]
    fn divide_sums_to_perft() {
        let start = GameState::new_game();
        let divided = perft_divide(&start, 2).expect("divide should run");
        assert_eq!(divided.len(), 20);
        assert!(divided.iter().all(|(_, nodes)| *nodes == 20));
    }

    #[test]
    #[ignore = "slow in debug builds"]
    fn perft_position_1_depth_4() {
        let result = perft(&GameState::new_game(), 4).expect("perft should run");
        assert_eq!(result.nodes, 197_281);
        assert_eq!(result.captures, 1576);
        assert_eq!(result.checks, 469);
        assert_eq!(result.checkmates, 8);
    }
}
