//! Game lifecycle: creating games, playing moves, genesis and queries.
//!
//! The [`Keeper`] owns its store and identity rule. Event sinks are handed
//! in per call. Every operation validates everything it needs before its
//! first write, so a failed operation leaves storage exactly as it was.

mod error;
mod events;
mod genesis;
mod identity;
mod messages;
mod msg_server;
mod query;
mod stored_game;

pub use error::KeeperError;
pub use events::{
    ACTION_MOVE_PLAYED, ACTION_NEW_GAME_CREATED, ATTRIBUTE_ACTION, ATTRIBUTE_BLACK,
    ATTRIBUTE_CAPTURED_X, ATTRIBUTE_CAPTURED_Y, ATTRIBUTE_CREATOR, ATTRIBUTE_ID_VALUE,
    ATTRIBUTE_INDEX, ATTRIBUTE_MODULE, ATTRIBUTE_RED, ATTRIBUTE_WINNER, Attribute,
    EVENT_TYPE_MESSAGE, Event, EventManager, EventSink, TracingSink,
};
pub use genesis::{GenesisError, GenesisState};
pub use identity::{AddressError, AnyIdentity, Bech32Rule, IdentityRule};
pub use messages::{MsgCreateGame, MsgCreateGameResponse, MsgPlayMove, MsgPlayMoveResponse};
pub use stored_game::{
    NEXT_GAME_KEY, NextGame, STORED_GAME_KEY, StoredGame, ValidationError, stored_game_key,
};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::games::checkers::Rules;
use crate::store::KvStore;

/// Name the keeper reports in the `module` event attribute.
pub const MODULE_NAME: &str = "checkers";

/// Checkers game keeper over a key-value store.
#[derive(Debug, Clone)]
pub struct Keeper<S, R = Bech32Rule> {
    store: S,
    identity: R,
    rules: Rules,
}

impl<S: KvStore, R: IdentityRule> Keeper<S, R> {
    /// Creates a keeper over `store`.
    pub fn new(store: S, identity: R, rules: Rules) -> Self {
        Self {
            store,
            identity,
            rules,
        }
    }

    /// Returns the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the keeper, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Returns the identity rule.
    pub fn identity(&self) -> &R {
        &self.identity
    }

    /// Returns the rules games are played by.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Reads and decodes one record.
    #[instrument(skip(self))]
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, KeeperError> {
        let Some(raw) = self.store.get(key)? else {
            debug!("Record absent");
            return Ok(None);
        };
        let record = serde_json::from_str(&raw)
            .map_err(|e| KeeperError::Record(format!("{}: {}", key, e)))?;
        Ok(Some(record))
    }

    /// Reads the stored game with `index`.
    fn load_stored_game(&self, index: &str) -> Result<Option<StoredGame>, KeeperError> {
        self.load(&stored_game_key(index))
    }

    /// Reads the next-id counter.
    fn load_next_game(&self) -> Result<Option<NextGame>, KeeperError> {
        self.load(NEXT_GAME_KEY)
    }
}

/// Encodes one record as a batch entry.
fn entry<T: Serialize>(key: String, record: &T) -> Result<(String, String), KeeperError> {
    Ok((key, serde_json::to_string(record)?))
}
