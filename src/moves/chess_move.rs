//! Move values and their wire text.
//!
//! The wire text is coordinate notation: origin, destination and an optional
//! promotion letter (`e2e4`, `e7e8q`). `MoveText` is the context-free form
//! that the transport carries; `Move` adds the classification tag, which can
//! only be recovered against a position (see [`Move::parse`]).

use std::fmt;
use std::str::FromStr;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::promotion_rank;
use crate::game_state::chess_types::{GameState, PieceKind, Square};
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoveKind {
    Normal,
    Capture,
    CastleKingside,
    CastleQueenside,
    EnPassant,
    /// Any pawn move onto the last rank, capturing or not.
    Promotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub kind: MoveKind,
}

impl Move {
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Self {
            from,
            to,
            promotion: None,
            kind,
        }
    }

    pub const fn promoting(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
            kind: MoveKind::Promotion,
        }
    }

    /// Coordinates and promotion only, as sent over the wire.
    pub const fn text(&self) -> MoveText {
        MoveText {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
        }
    }

    /// Fills in the Queen for a promotion that did not name a piece.
    pub fn with_default_promotion(self) -> Self {
        if self.kind == MoveKind::Promotion && self.promotion.is_none() {
            Self {
                promotion: Some(PieceKind::Queen),
                ..self
            }
        } else {
            self
        }
    }

    pub fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }

    /// Parses wire text and classifies it against `state`.
    ///
    /// Only the text is checked for well-formedness here; whether the move is
    /// legal is decided by `apply_move`.
    pub fn parse(text: &str, state: &GameState) -> ChessResult<Move> {
        text.parse::<MoveText>()?.classify(state)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.text().fmt(f)
    }
}

/// Context-free move text: what a peer or a keyboard actually supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveText {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveText {
    /// Attaches the classification tag the move would have in `state`.
    ///
    /// Castling is a king moving two files, en passant a pawn moving
    /// diagonally onto the en-passant target, promotion a pawn reaching its
    /// last rank, and a capture anything landing on an occupied square.
    pub fn classify(self, state: &GameState) -> ChessResult<Move> {
        let moving_kind = state.board.get(self.from).map(|p| p.kind);

        if self.promotion.is_some() && moving_kind.is_some_and(|k| k != PieceKind::Pawn) {
            return Err(ChessError::illegal(self, "only pawns may promote"));
        }

        let kind = classify_kind(state, self.from, self.to);

        if self.promotion.is_some() && kind != MoveKind::Promotion {
            return Err(ChessError::illegal(self, "promotion requires reaching the last rank"));
        }

        Ok(Move {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
            kind,
        })
    }
}

/// Tag a move from `from` to `to` would carry in `state`.
pub fn classify_kind(state: &GameState, from: Square, to: Square) -> MoveKind {
    let occupied = !state.board.is_empty(to);
    match state.board.get(from) {
        Some(piece) if piece.kind == PieceKind::King && from.file().abs_diff(to.file()) == 2 => {
            if to.file() > from.file() {
                MoveKind::CastleKingside
            } else {
                MoveKind::CastleQueenside
            }
        }
        Some(piece) if piece.kind == PieceKind::Pawn && to.rank() == promotion_rank(piece.color) => {
            MoveKind::Promotion
        }
        Some(piece)
            if piece.kind == PieceKind::Pawn
                && !occupied
                && from.file() != to.file()
                && state.en_passant_target == Some(to) =>
        {
            MoveKind::EnPassant
        }
        _ if occupied => MoveKind::Capture,
        _ => MoveKind::Normal,
    }
}

impl fmt::Display for MoveText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

impl FromStr for MoveText {
    type Err = ChessError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let malformed = || ChessError::MalformedMove(trimmed.to_owned());

        if !trimmed.is_ascii() || !(4..=5).contains(&trimmed.len()) {
            return Err(malformed());
        }

        let from = algebraic_to_square(&trimmed[0..2]).map_err(|_| malformed())?;
        let to = algebraic_to_square(&trimmed[2..4]).map_err(|_| malformed())?;
        if from == to {
            return Err(malformed());
        }

        let promotion = match trimmed[4..].chars().next() {
            None => None,
            Some(ch) => match PieceKind::from_letter(ch) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(malformed()),
            },
        };

        Ok(MoveText { from, to, promotion })
    }
}
