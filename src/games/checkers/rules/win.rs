//! Win detection for checkers.

use super::super::{Board, Color};
use super::Rules;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Predicate deciding when a side has lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    /// A side loses once it has no pieces left.
    #[default]
    NoPieces,
    /// A side loses once it has no legal move, including having no pieces.
    NoLegalMoves,
}

impl WinCondition {
    /// Returns true if `side` has lost on `board`.
    #[instrument(skip(rules, board))]
    pub fn is_defeated(self, rules: &Rules, board: &Board, side: Color) -> bool {
        match self {
            WinCondition::NoPieces => board.count(side) == 0,
            WinCondition::NoLegalMoves => rules.legal_moves(board, side).is_empty(),
        }
    }
}
