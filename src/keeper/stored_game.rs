//! Persisted records: stored games and the next-id counter.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::identity::{AddressError, IdentityRule};
use crate::games::checkers::{CodecError, Game, Player};

/// Storage key prefix of stored games; the index follows.
pub const STORED_GAME_KEY: &str = "StoredGame-value-";
/// Storage key of the next-id counter.
pub const NEXT_GAME_KEY: &str = "NextGame-value-";

/// Returns the storage key of the game with `index`.
pub fn stored_game_key(index: &str) -> String {
    format!("{}{}", STORED_GAME_KEY, index)
}

/// A game as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct StoredGame {
    /// Account that created the game.
    creator: String,
    /// Decimal id, unique and immutable.
    index: String,
    /// Encoded board.
    game: String,
    /// Encoded side to move.
    turn: String,
    /// Participant playing red.
    red: String,
    /// Participant playing black.
    black: String,
    /// Moves accepted since creation.
    move_count: u64,
}

impl StoredGame {
    /// Creates the record of a freshly started game.
    pub fn new(creator: String, index: String, game: &Game, red: String, black: String) -> Self {
        Self {
            creator,
            index,
            game: game.board_string(),
            turn: game.turn_string().to_string(),
            red,
            black,
            move_count: 0,
        }
    }

    /// Decodes the board and side to move.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the stored strings are malformed.
    pub fn parse_game(&self) -> Result<Game, CodecError> {
        Game::parse(&self.game, &self.turn)
    }

    /// Returns the colour `identity` may move right now, or `None` if
    /// `identity` is not a participant.
    ///
    /// An identity playing both sides may move whichever side is on turn.
    pub fn authorized_player(&self, identity: &str, turn: Player) -> Option<Player> {
        let is_red = self.red == identity;
        let is_black = self.black == identity;
        match (is_red, is_black) {
            (true, true) => Some(turn),
            (true, false) => Some(Player::Red),
            (false, true) => Some(Player::Black),
            (false, false) => None,
        }
    }

    /// Stores the state reached after one more accepted move.
    pub fn record_move(&mut self, game: &Game) {
        self.game = game.board_string();
        self.turn = game.turn_string().to_string();
        self.move_count += 1;
    }

    /// Checks the participants' identities and that the board parses.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, checking the creator,
    /// the board, red and black in that order.
    #[instrument(skip(self, rule), fields(index = %self.index))]
    pub fn validate(&self, rule: &impl IdentityRule) -> Result<(), ValidationError> {
        rule.check(&self.creator)
            .map_err(|e| ValidationError::InvalidCreator(self.creator.clone(), e))?;
        self.parse_game().map_err(ValidationError::GameNotParseable)?;
        rule.check(&self.red)
            .map_err(|e| ValidationError::InvalidRed(self.red.clone(), e))?;
        rule.check(&self.black)
            .map_err(|e| ValidationError::InvalidBlack(self.black.clone(), e))?;
        Ok(())
    }
}

/// The next id to hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextGame {
    /// Id the next created game receives.
    pub id_value: u64,
}

impl NextGame {
    /// Creates a counter.
    pub fn new(id_value: u64) -> Self {
        Self { id_value }
    }
}

impl Default for NextGame {
    fn default() -> Self {
        Self::new(1)
    }
}

/// A stored game record that fails validation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ValidationError {
    /// Malformed creator identity.
    #[display("creator address is invalid: {}: {}", _0, _1)]
    InvalidCreator(String, AddressError),

    /// Malformed red identity.
    #[display("red address is invalid: {}: {}", _0, _1)]
    InvalidRed(String, AddressError),

    /// Malformed black identity.
    #[display("black address is invalid: {}: {}", _0, _1)]
    InvalidBlack(String, AddressError),

    /// Board or turn cannot be decoded.
    #[display("game cannot be parsed: {}", _0)]
    GameNotParseable(CodecError),
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ValidationError::InvalidCreator(_, e)
            | ValidationError::InvalidRed(_, e)
            | ValidationError::InvalidBlack(_, e) => Some(e),
            ValidationError::GameNotParseable(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keeper::identity::AnyIdentity;

    fn sample(red: &str, black: &str) -> StoredGame {
        StoredGame::new(
            "alice".to_string(),
            "1".to_string(),
            &Game::new(),
            red.to_string(),
            black.to_string(),
        )
    }

    #[test]
    fn test_fresh_record() {
        let stored = sample("bob", "carol");
        assert_eq!(stored.turn(), "b");
        assert_eq!(*stored.move_count(), 0);
        assert_eq!(stored.parse_game().expect("parses"), Game::new());
    }

    #[test]
    fn test_authorized_player() {
        let stored = sample("bob", "carol");
        assert_eq!(stored.authorized_player("bob", Player::Black), Some(Player::Red));
        assert_eq!(stored.authorized_player("carol", Player::Black), Some(Player::Black));
        assert_eq!(stored.authorized_player("dave", Player::Black), None);

        let solo = sample("bob", "bob");
        assert_eq!(solo.authorized_player("bob", Player::Black), Some(Player::Black));
        assert_eq!(solo.authorized_player("bob", Player::Red), Some(Player::Red));
    }

    #[test]
    fn test_validate_reports_first_problem() {
        let stored = sample("", "");
        assert!(matches!(
            stored.validate(&AnyIdentity),
            Err(ValidationError::InvalidRed(_, AddressError::Empty))
        ));
    }

    #[test]
    fn test_record_move_counts() {
        let mut stored = sample("bob", "carol");
        stored.record_move(&Game::new());
        stored.record_move(&Game::new());
        assert_eq!(*stored.move_count(), 2);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(sample("bob", "carol")).expect("serializes");
        assert_eq!(json["moveCount"], 0);
        assert_eq!(json["index"], "1");
        let next = serde_json::to_value(NextGame::default()).expect("serializes");
        assert_eq!(next["idValue"], 1);
    }
}
