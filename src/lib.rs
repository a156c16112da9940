//! Checkers keeper library - checkers games persisted in a key-value store
//!
//! Games are created and played through a [`Keeper`], which validates every
//! request against the rules engine before anything is written.
//!
//! # Architecture
//!
//! - **Codec**: board and turn encoding used by stored records
//! - **Rules**: move legality, captures, promotion, continuation and win policies
//! - **Keeper**: game creation, move handling, genesis and queries
//! - **Store**: key-value backends (in memory or SQLite)
//!
//! # Example
//!
//! ```
//! use checkers_keeper::{
//!     AnyIdentity, EventManager, GenesisState, Keeper, MemoryStore, MsgCreateGame,
//!     MsgPlayMove, Rules,
//! };
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut keeper = Keeper::new(MemoryStore::new(), AnyIdentity, Rules::default());
//! keeper.init_genesis(&GenesisState::default())?;
//!
//! let mut events = EventManager::new();
//! let created = keeper.create_game(
//!     &MsgCreateGame::new("alice".into(), "bob".into(), "carol".into()),
//!     &mut events,
//! )?;
//! let played = keeper.play_move(
//!     &MsgPlayMove::new("carol".into(), created.id_value, 1, 2, 2, 3),
//!     &mut events,
//! )?;
//! assert_eq!(played.winner, "NO_PLAYER");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod games;
mod keeper;
mod store;

// Crate-level exports - Configuration
pub use config::{ConfigError, KeeperConfig};

// Crate-level exports - Game types (checkers)
pub use games::checkers::{
    BOARD_DIM, Board, CodecError, Color, Continuation, FIRST_MOVER, Game, Move, MoveError,
    MoveOutcome, Piece, Player, Pos, ROW_SEP, Rank, Rules, WinCondition, turn_from_str,
    turn_to_str,
};

// Crate-level exports - Keeper
pub use keeper::{
    ACTION_MOVE_PLAYED, ACTION_NEW_GAME_CREATED, ATTRIBUTE_ACTION, ATTRIBUTE_BLACK,
    ATTRIBUTE_CAPTURED_X, ATTRIBUTE_CAPTURED_Y, ATTRIBUTE_CREATOR, ATTRIBUTE_ID_VALUE,
    ATTRIBUTE_INDEX, ATTRIBUTE_MODULE, ATTRIBUTE_RED, ATTRIBUTE_WINNER, AddressError,
    AnyIdentity, Attribute, Bech32Rule, EVENT_TYPE_MESSAGE, Event, EventManager, EventSink,
    GenesisError, GenesisState, IdentityRule, Keeper, KeeperError, MODULE_NAME,
    MsgCreateGame, MsgCreateGameResponse, MsgPlayMove, MsgPlayMoveResponse, NEXT_GAME_KEY,
    NextGame, STORED_GAME_KEY, StoredGame, TracingSink, ValidationError, stored_game_key,
};

// Crate-level exports - Storage
pub use db::{KvEntry, MIGRATIONS, NewKvEntry, SqliteStore};
pub use store::{KvStore, MemoryStore, StoreError};
