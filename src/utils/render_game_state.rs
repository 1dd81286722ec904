//! Terminal board renderer.
//!
//! Produces the text diagram the console front-end prints after every move.
//! White is drawn at the bottom unless the board is flipped for the black
//! player.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Render the board with rank 8 at the top.
pub fn render_game_state(game_state: &GameState) -> String {
    render_for(game_state, Color::White)
}

/// Render the board from `perspective`'s side of the table.
pub fn render_for(game_state: &GameState, perspective: Color) -> String {
    let (ranks, files): (Vec<u8>, Vec<u8>) = match perspective {
        Color::White => ((0..8).rev().collect(), (0..8).collect()),
        Color::Black => ((0..8).collect(), (0..8).rev().collect()),
    };

    let file_labels: String = files
        .iter()
        .map(|f| char::from(b'a' + f).to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = format!("  {file_labels}\n");

    for &rank in &ranks {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for (i, &file) in files.iter().enumerate() {
            let piece = Square::from_file_rank(file, rank).and_then(|sq| game_state.board.get(sq));
            out.push(piece.map(piece_to_unicode).unwrap_or('·'));
            if i < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str(&format!("  {file_labels}"));
    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}
