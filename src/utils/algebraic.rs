//! Square name conversions.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and `Square`
//! values for FEN, the move wire format and the console front-end.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Convert a coordinate such as `"e4"` to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::MalformedMove(format!("invalid square name: {square}")));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::MalformedMove(format!("invalid file: {}", file as char)));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::MalformedMove(format!("invalid rank: {}", rank as char)));
    }

    Square::from_file_rank(file - b'a', rank - b'1')
        .ok_or_else(|| ChessError::MalformedMove(format!("invalid square name: {square}")))
}
