//! Checkers: board encoding, rules and game state.

mod action;
mod board;
mod game;
mod rules;
mod types;

pub use action::{Move, MoveError, MoveOutcome};
pub use board::{Board, CodecError, ROW_SEP, turn_from_str, turn_to_str};
pub use game::{FIRST_MOVER, Game};
pub use rules::{Continuation, Rules, WinCondition};
pub use types::{BOARD_DIM, Color, Piece, Player, Pos, Rank};
