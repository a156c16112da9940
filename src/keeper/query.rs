//! Read-only queries.

use tracing::{debug, instrument};

use super::{IdentityRule, Keeper, KeeperError, NextGame, STORED_GAME_KEY, StoredGame};
use crate::games::checkers::{Move, Player};
use crate::store::KvStore;

impl<S: KvStore, R: IdentityRule> Keeper<S, R> {
    /// Returns the game with `index`.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::GameNotFound`] if there is none.
    #[instrument(skip(self))]
    pub fn stored_game(&self, index: &str) -> Result<StoredGame, KeeperError> {
        self.load_stored_game(index)?
            .ok_or_else(|| KeeperError::GameNotFound(index.to_string()))
    }

    /// Returns every stored game, ordered by numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::Record`] if a record cannot be decoded.
    #[instrument(skip(self))]
    pub fn all_stored_games(&self) -> Result<Vec<StoredGame>, KeeperError> {
        let mut games = self
            .store
            .iter_prefix(STORED_GAME_KEY)?
            .into_iter()
            .map(|(key, raw)| {
                serde_json::from_str::<StoredGame>(&raw)
                    .map_err(|e| KeeperError::Record(format!("{}: {}", key, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        games.sort_by_key(|g| (g.index().parse::<u64>().unwrap_or(u64::MAX), g.index().clone()));
        debug!(count = games.len(), "Stored games listed");
        Ok(games)
    }

    /// Returns the next-id counter.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::MissingNextGame`] if it was never initialized.
    #[instrument(skip(self))]
    pub fn next_game(&self) -> Result<NextGame, KeeperError> {
        self.load_next_game()?.ok_or(KeeperError::MissingNextGame)
    }

    /// Checks whether `player` could play `mv` in game `index` right now.
    ///
    /// Nothing is written and no event is emitted.
    ///
    /// # Errors
    ///
    /// Returns the error [`Keeper::play_move`] would return for the same
    /// move by a participant of that colour.
    #[instrument(skip(self, index), fields(game_id = %index))]
    pub fn can_play_move(&self, index: &str, player: Player, mv: Move) -> Result<(), KeeperError> {
        let stored = self.stored_game(index)?;
        let game = stored.parse_game()?;
        if !game.turn_is(player) {
            return Err(KeeperError::OutOfTurn {
                identity: player.to_string(),
                turn: game.turn(),
            });
        }
        self.rules.validate(game.board(), game.turn(), mv)?;
        debug!("Move is playable");
        Ok(())
    }
}
