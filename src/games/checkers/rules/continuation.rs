//! Turn continuation after a capture.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Decides whether the mover keeps the turn after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Continuation {
    /// The turn always passes after one accepted move.
    #[default]
    Alternate,
    /// After a capture the mover keeps the turn while the capturing piece can
    /// jump again. Crowning a man ends the turn.
    ///
    /// The engine keeps no memory between moves, so the extra move is granted
    /// to the side, not pinned to the capturing piece. It need not be a
    /// capture either: the side may spend it on a plain step with any of its
    /// pieces, after which the turn passes as usual.
    MultiJump,
}

impl Continuation {
    /// Returns true if the side that just moved moves again.
    ///
    /// `further_jump` is only consulted when the policy needs it.
    #[instrument(skip(further_jump))]
    pub fn keeps_turn(
        self,
        captured: bool,
        crowned: bool,
        further_jump: impl FnOnce() -> bool,
    ) -> bool {
        match self {
            Continuation::Alternate => false,
            Continuation::MultiJump => captured && !crowned && further_jump(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternate_never_keeps_turn() {
        assert!(!Continuation::Alternate.keeps_turn(true, false, || true));
    }

    #[test]
    fn test_multi_jump_needs_capture_and_follow_up() {
        let policy = Continuation::MultiJump;
        assert!(policy.keeps_turn(true, false, || true));
        assert!(!policy.keeps_turn(true, false, || false));
        assert!(!policy.keeps_turn(false, false, || true));
        assert!(!policy.keeps_turn(true, true, || true));
    }
}
