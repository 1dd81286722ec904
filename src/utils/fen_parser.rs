//! FEN-to-GameState parser.
//!
//! FEN is the state-transfer format between peers and the fixture format for
//! tests. Parsed positions are validated before they are handed out.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{pawn_direction, pawn_start_rank};
use crate::game_state::{board::Board, chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let invalid = |msg: &str| ChessError::InvalidFen(msg.to_owned());
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    // Clocks are optional, as in many hand-written FENs.
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    let turn = parse_side_to_move(side_part)?;
    let state = GameState {
        board,
        turn,
        castling_rights: parse_castling_rights(castling_part, &board)?,
        en_passant_target: parse_en_passant_target(en_passant_part, turn, &board)?,
        halfmove_clock: halfmove_part
            .parse::<u16>()
            .map_err(|_| ChessError::InvalidFen(format!("invalid halfmove clock: {halfmove_part}")))?,
        fullmove_number: fullmove_part
            .parse::<u16>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| ChessError::InvalidFen(format!("invalid fullmove number: {fullmove_part}")))?,
    };

    state.validate()?;
    Ok(state)
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::InvalidFen("board layout must contain 8 ranks".to_owned()));
    }

    let mut board = Board::empty();
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::InvalidFen(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(ChessError::InvalidFen(format!("rank {} has too many files", rank + 1)));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| ChessError::InvalidFen(format!("invalid piece character '{ch}'")))?;
            let square = Square::from_file_rank(file, rank)
                .ok_or_else(|| ChessError::InvalidFen(format!("rank {} has too many files", rank + 1)))?;
            board = board.set(square, Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::InvalidFen(format!(
                "rank {} does not sum to 8 files",
                rank + 1
            )));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessError::InvalidFen(format!("invalid side to move: {side_part}"))),
    }
}

/// Rights are kept only where the king and rook actually stand at home, so a
/// careless FEN cannot enable castling with a missing rook.
fn parse_castling_rights(castling_part: &str, board: &Board) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights.white_kingside = true,
            'Q' => rights.white_queenside = true,
            'k' => rights.black_kingside = true,
            'q' => rights.black_queenside = true,
            _ => {
                return Err(ChessError::InvalidFen(format!("invalid castling rights character: {ch}")))
            }
        }
    }

    let at = |square: Square, color: Color, kind: PieceKind| board.get(square) == Some(Piece::new(color, kind));
    let white_king = at(Square::E1, Color::White, PieceKind::King);
    let black_king = at(Square::E8, Color::Black, PieceKind::King);
    rights.white_kingside &= white_king && at(Square::H1, Color::White, PieceKind::Rook);
    rights.white_queenside &= white_king && at(Square::A1, Color::White, PieceKind::Rook);
    rights.black_kingside &= black_king && at(Square::H8, Color::Black, PieceKind::Rook);
    rights.black_queenside &= black_king && at(Square::A8, Color::Black, PieceKind::Rook);

    Ok(rights)
}

/// The target must sit on the square a pawn of the side that just moved
/// skipped: rank 3 after a white double advance, rank 6 after a black one.
/// That pawn must stand just beyond the target, with the target and the
/// pawn's start square both empty.
fn parse_en_passant_target(en_passant_part: &str, turn: Color, board: &Board) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| ChessError::InvalidFen(format!("invalid en-passant square: {en_passant_part}")))?;
    let mover = turn.opposite();
    let expected_rank = (pawn_start_rank(mover) as i8 + pawn_direction(mover)) as u8;
    if square.rank() != expected_rank {
        return Err(ChessError::InvalidFen(format!(
            "en-passant square {square} is not on the skipped rank"
        )));
    }

    let direction = pawn_direction(mover);
    let landed = square.offset(0, direction).map(|s| board.get(s));
    let start = square.offset(0, -direction).map(|s| board.get(s));
    let plausible = board.is_empty(square)
        && landed == Some(Some(Piece::new(mover, PieceKind::Pawn)))
        && start == Some(None);
    if !plausible {
        return Err(ChessError::InvalidFen(format!(
            "no {mover} pawn can have just double-advanced past {square}"
        )));
    }

    Ok(Some(square))
}
