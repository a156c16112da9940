//! Move legality, captures and promotion for checkers.
//!
//! The engine is a pure function of the board and the side to move; the
//! only other input is the static [`Rules`] configuration that picks the
//! continuation and win policies.

pub mod continuation;
pub mod win;

pub use continuation::Continuation;
pub use win::WinCondition;

use super::{Board, Color, Move, MoveError, MoveOutcome, Piece, Player, Pos, Rank};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// File deltas of the two diagonals in each row direction.
const FILE_DIRECTIONS: [i32; 2] = [-1, 1];

/// Checkers rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Setters)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct Rules {
    /// Whether a capture can extend the mover's turn.
    continuation: Continuation,
    /// When the opponent counts as beaten.
    win_condition: WinCondition,
}

/// A move that passed every check, before it is carried out.
#[derive(Debug, Clone, Copy)]
struct Checked {
    piece: Piece,
    captured: Option<Pos>,
}

impl Rules {
    /// Returns the continuation policy.
    pub fn continuation(&self) -> Continuation {
        self.continuation
    }

    /// Returns the win condition.
    pub fn win_condition(&self) -> WinCondition {
        self.win_condition
    }

    /// Applies `mv` for the side `turn`, returning the new board and outcome.
    ///
    /// The input board is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] describing the first rule the move breaks.
    #[instrument(skip(self, board), fields(from = %mv.from, to = %mv.to))]
    pub fn apply_move(
        &self,
        board: &Board,
        turn: Player,
        mv: Move,
    ) -> Result<(Board, MoveOutcome), MoveError> {
        let Checked { mut piece, captured } = self.check(board, turn, mv)?;

        let mut next = board.clone();
        if let Some(square) = captured {
            next.take(square);
        }
        next.take(mv.from);

        let crowned = piece.rank == Rank::Man && mv.to.y == piece.color.crowning_row();
        if crowned {
            piece.rank = Rank::King;
        }
        next.set(mv.to, Some(piece));

        let mover = piece.color;
        let outcome = if self.win_condition.is_defeated(self, &next, mover.opponent()) {
            MoveOutcome {
                captured,
                turn: Player::NoPlayer,
                winner: mover.into(),
            }
        } else {
            let keeps_turn = self
                .continuation
                .keeps_turn(captured.is_some(), crowned, || self.has_jump(&next, mv.to));
            let turn = if keeps_turn { mover } else { mover.opponent() };
            MoveOutcome {
                captured,
                turn: turn.into(),
                winner: Player::NoPlayer,
            }
        };

        debug!(
            captured = ?outcome.captured,
            crowned,
            turn = %outcome.turn,
            winner = %outcome.winner,
            "Move applied"
        );
        Ok((next, outcome))
    }

    /// Checks `mv` without carrying it out.
    ///
    /// # Errors
    ///
    /// Returns the same [`MoveError`] [`Rules::apply_move`] would.
    pub fn validate(&self, board: &Board, turn: Player, mv: Move) -> Result<(), MoveError> {
        self.check(board, turn, mv).map(|_| ())
    }

    /// Lists every move `color` may make on `board`.
    #[instrument(skip(self, board))]
    pub fn legal_moves(&self, board: &Board, color: Color) -> Vec<Move> {
        let turn = Player::from(color);
        let mut moves = Vec::new();
        for (from, piece) in board.pieces().filter(|(_, piece)| piece.color == color) {
            for &dy in piece.row_directions() {
                for dx in FILE_DIRECTIONS {
                    for distance in [1, 2] {
                        let mv = Move::new(from, from.offset(dx * distance, dy * distance));
                        if self.check(board, turn, mv).is_ok() {
                            moves.push(mv);
                        }
                    }
                }
            }
        }
        moves
    }

    /// Returns true if the piece on `from` can capture something.
    pub fn has_jump(&self, board: &Board, from: Pos) -> bool {
        let Some(piece) = board.get(from) else {
            return false;
        };
        piece.row_directions().iter().any(|&dy| {
            FILE_DIRECTIONS.iter().any(|&dx| {
                let mv = Move::new(from, from.offset(2 * dx, 2 * dy));
                matches!(
                    self.check(board, piece.color.into(), mv),
                    Ok(Checked { captured: Some(_), .. })
                )
            })
        })
    }

    fn check(&self, board: &Board, turn: Player, mv: Move) -> Result<Checked, MoveError> {
        for pos in [mv.from, mv.to] {
            if !pos.in_bounds() {
                return Err(MoveError::OutOfBounds(pos));
            }
        }

        let piece = board
            .get(mv.from)
            .ok_or(MoveError::NoPieceAtSource(mv.from))?;

        if Player::from(piece.color) != turn {
            return Err(MoveError::OutOfTurn {
                piece: piece.color,
                turn,
            });
        }

        if board.is_occupied(mv.to) {
            return Err(MoveError::OccupiedDestination(mv.to));
        }

        let captured = self.classify(board, piece, mv)?;
        Ok(Checked { piece, captured })
    }

    /// Sorts a move into a step (`None`) or a jump over the returned square.
    fn classify(&self, board: &Board, piece: Piece, mv: Move) -> Result<Option<Pos>, MoveError> {
        let illegal = MoveError::IllegalGeometry {
            from: mv.from,
            to: mv.to,
        };
        let dx = mv.to.x - mv.from.x;
        let dy = mv.to.y - mv.from.y;

        if !mv.to.is_playable() || dx.abs() != dy.abs() || !(1..=2).contains(&dy.abs()) {
            return Err(illegal);
        }
        if !piece.row_directions().contains(&dy.signum()) {
            return Err(illegal);
        }
        if dy.abs() == 1 {
            return Ok(None);
        }

        let over = mv.from.midpoint(mv.to);
        match board.get(over) {
            Some(target) if target.color != piece.color => Ok(Some(over)),
            _ => Err(MoveError::MissingCaptureTarget(over)),
        }
    }
}
