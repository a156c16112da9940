//! Initial and exported keeper state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::{
    IdentityRule, Keeper, KeeperError, NEXT_GAME_KEY, NextGame, StoredGame, entry, stored_game_key,
};
use crate::store::KvStore;

/// Complete keeper state: the id counter and every stored game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenesisState {
    /// Id the next created game receives.
    pub next_game: NextGame,
    /// Stored games.
    pub stored_game_list: Vec<StoredGame>,
}

impl GenesisState {
    /// Checks that indices are unique numbers below the counter.
    ///
    /// # Errors
    ///
    /// Returns the first [`GenesisError`] found.
    pub fn validate(&self) -> Result<(), GenesisError> {
        let mut seen = HashSet::new();
        for stored in &self.stored_game_list {
            let index = stored.index();
            if !seen.insert(index.as_str()) {
                return Err(GenesisError::DuplicateIndex(index.clone()));
            }
            let id: u64 = index
                .parse()
                .map_err(|_| GenesisError::NonNumericIndex(index.clone()))?;
            if id >= self.next_game.id_value {
                return Err(GenesisError::IndexNotBelowCounter {
                    index: index.clone(),
                    next: self.next_game.id_value,
                });
            }
        }
        Ok(())
    }
}

/// Inconsistent genesis state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GenesisError {
    /// Two games share an index.
    #[display("duplicated index for storedGame: {}", _0)]
    DuplicateIndex(String),

    /// An index that is not a decimal number.
    #[display("storedGame index is not a number: {}", _0)]
    NonNumericIndex(String),

    /// A game the counter would hand out again.
    #[display("storedGame index {} is not below next id {}", index, next)]
    IndexNotBelowCounter {
        /// Offending index.
        index: String,
        /// Counter value.
        next: u64,
    },
}

impl std::error::Error for GenesisError {}

impl<S: KvStore, R: IdentityRule> Keeper<S, R> {
    /// Writes `genesis` to an uninitialized store in one batch.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::AlreadyInitialized`] if the store already
    /// holds a counter, [`KeeperError::Genesis`] if the state is inconsistent,
    /// [`KeeperError::Validation`] if a game is malformed and
    /// [`KeeperError::Store`] if writing fails.
    #[instrument(skip(self, genesis), fields(games = genesis.stored_game_list.len()))]
    pub fn init_genesis(&mut self, genesis: &GenesisState) -> Result<(), KeeperError> {
        if let Some(existing) = self.load_next_game()? {
            warn!(next_id = existing.id_value, "Genesis refused on initialized store");
            return Err(KeeperError::AlreadyInitialized(existing.id_value));
        }
        genesis.validate()?;
        for stored in &genesis.stored_game_list {
            stored.validate(&self.identity)?;
        }

        let mut batch = Vec::with_capacity(genesis.stored_game_list.len() + 1);
        for stored in &genesis.stored_game_list {
            batch.push(entry(stored_game_key(stored.index()), stored)?);
        }
        batch.push(entry(NEXT_GAME_KEY.to_string(), &genesis.next_game)?);
        self.store.write_batch(batch)?;

        info!(next_id = genesis.next_game.id_value, "Genesis initialized");
        Ok(())
    }

    /// Reads the whole keeper state back.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::MissingNextGame`] if the store was never
    /// initialized.
    #[instrument(skip(self))]
    pub fn export_genesis(&self) -> Result<GenesisState, KeeperError> {
        Ok(GenesisState {
            next_game: self.next_game()?,
            stored_game_list: self.all_stored_games()?,
        })
    }
}
