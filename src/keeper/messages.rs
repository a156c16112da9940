//! Requests accepted by the keeper and their responses.

use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::games::checkers::{Move, Pos};

/// Starts a new game between `red` and `black`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct MsgCreateGame {
    /// Account submitting the request.
    pub creator: String,
    /// Participant playing red.
    pub red: String,
    /// Participant playing black.
    pub black: String,
}

/// Id assigned to a created game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgCreateGameResponse {
    /// Decimal game id.
    pub id_value: String,
}

/// Plays one move in an existing game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct MsgPlayMove {
    /// Account submitting the move.
    pub creator: String,
    /// Game id.
    pub id_value: String,
    /// Source column.
    pub from_x: i32,
    /// Source row.
    pub from_y: i32,
    /// Destination column.
    pub to_x: i32,
    /// Destination row.
    pub to_y: i32,
}

impl MsgPlayMove {
    /// The requested move.
    pub fn as_move(&self) -> Move {
        Move::new(
            Pos::new(self.from_x, self.from_y),
            Pos::new(self.to_x, self.to_y),
        )
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgPlayMoveResponse {
    /// Game id.
    pub id_value: String,
    /// Column of the captured piece, `-1` if none.
    pub captured_x: i32,
    /// Row of the captured piece, `-1` if none.
    pub captured_y: i32,
    /// `red`, `black` or `NO_PLAYER`.
    pub winner: String,
}
