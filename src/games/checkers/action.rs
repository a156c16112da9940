//! First-class action types for checkers.
//!
//! A move is a request to carry the piece on one square to another. It is
//! validated by the rules engine before anything changes.

use super::{Color, Player, Pos};
use serde::{Deserialize, Serialize};

/// A move from one square to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Square the piece starts on.
    pub from: Pos,
    /// Square the piece lands on.
    pub to: Pos,
}

impl Move {
    /// Creates a new move.
    pub fn new(from: Pos, to: Pos) -> Self {
        Self { from, to }
    }

    /// Returns true if the move spans two diagonals.
    pub fn is_jump(&self) -> bool {
        (self.to.x - self.from.x).abs() == 2 && (self.to.y - self.from.y).abs() == 2
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Square of the captured piece, if the move was a jump.
    pub captured: Option<Pos>,
    /// Side to move next, `NoPlayer` once the game is won.
    pub turn: Player,
    /// Winner, `NoPlayer` while the game continues.
    pub winner: Player,
}

impl MoveOutcome {
    /// Captured square with [`Pos::NONE`] standing in for "nothing captured".
    pub fn captured_square(&self) -> Pos {
        self.captured.unwrap_or(Pos::NONE)
    }
}

/// Reason the rules engine rejected a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// A coordinate lies off the board.
    #[display("Position off the board: {}", _0)]
    OutOfBounds(Pos),

    /// The source square is empty.
    #[display("No piece at source position: {}", _0)]
    NoPieceAtSource(Pos),

    /// The piece belongs to the side not on move.
    #[display("Not {}'s turn (turn: {})", piece, turn)]
    OutOfTurn {
        /// Colour of the piece that was asked to move.
        piece: Color,
        /// Side actually on move.
        turn: Player,
    },

    /// The destination square is taken.
    #[display("Already piece at destination position: {}", _0)]
    OccupiedDestination(Pos),

    /// Not a diagonal step or jump this piece may make.
    #[display("Invalid move: {} to {}", from, to)]
    IllegalGeometry {
        /// Source square.
        from: Pos,
        /// Destination square.
        to: Pos,
    },

    /// A jump over a square without an opposing piece.
    #[display("No opposing piece to capture at {}", _0)]
    MissingCaptureTarget(Pos),
}

impl std::error::Error for MoveError {}
