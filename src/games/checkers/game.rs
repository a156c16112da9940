//! A board together with the side to move.

use super::board::{turn_from_str, turn_to_str};
use super::{Board, CodecError, Color, Move, MoveError, MoveOutcome, Player, Rules};
use tracing::instrument;

/// Color that moves first from the standard position.
pub const FIRST_MOVER: Color = Color::Black;

/// Checkers game state: everything the rules engine needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Player,
}

impl Game {
    /// Creates a game in the standard starting position.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::standard(),
            turn: FIRST_MOVER.into(),
        }
    }

    /// Creates a game from an arbitrary board and side to move.
    pub fn from_parts(board: Board, turn: Player) -> Self {
        Self { board, turn }
    }

    /// Decodes a stored board and turn.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if either part is malformed.
    #[instrument(skip(board, turn))]
    pub fn parse(board: &str, turn: &str) -> Result<Self, CodecError> {
        Ok(Self {
            board: Board::parse(board)?,
            turn: turn_from_str(turn)?,
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns true if `player` is on move.
    pub fn turn_is(&self, player: Player) -> bool {
        player != Player::NoPlayer && self.turn == player
    }

    /// Encoded board.
    pub fn board_string(&self) -> String {
        self.board.serialize()
    }

    /// Encoded side to move.
    pub fn turn_string(&self) -> &'static str {
        turn_to_str(self.turn)
    }

    /// Plays `mv` for the side on move, updating the game in place.
    ///
    /// On error the game is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the rules reject the move.
    #[instrument(skip(self, rules), fields(turn = %self.turn))]
    pub fn play(&mut self, rules: &Rules, mv: Move) -> Result<MoveOutcome, MoveError> {
        let (board, outcome) = rules.apply_move(&self.board, self.turn, mv)?;
        self.board = board;
        self.turn = outcome.turn;
        Ok(outcome)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
