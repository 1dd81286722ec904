//! GameState-to-FEN writer, the inverse of `fen_parser`.

use crate::game_state::{chess_types::*, game_state::GameState};

pub fn generate_fen(game_state: &GameState) -> String {
    let side_to_move = match game_state.turn {
        Color::White => "w",
        Color::Black => "b",
    };
    let en_passant = game_state
        .en_passant_target
        .map(|square| square.to_string())
        .unwrap_or_else(|| "-".to_owned());

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(&game_state.board),
        side_to_move,
        generate_castling_field(game_state.castling_rights),
        en_passant,
        game_state.halfmove_clock,
        game_state.fullmove_number
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            let piece = Square::from_file_rank(file, rank).and_then(|sq| board.get(sq));
            if let Some(piece) = piece {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece.fen_char());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let flags = [
        (rights.white_kingside, 'K'),
        (rights.white_queenside, 'Q'),
        (rights.black_kingside, 'k'),
        (rights.black_queenside, 'q'),
    ];
    let field: String = flags.iter().filter(|(set, _)| *set).map(|(_, letter)| *letter).collect();
    if field.is_empty() {
        "-".to_owned()
    } else {
        field
    }
}
