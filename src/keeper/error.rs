//! Keeper error types.

use crate::games::checkers::{CodecError, MoveError, Player};
use crate::store::StoreError;

use super::genesis::GenesisError;
use super::stored_game::ValidationError;

/// Reason a keeper operation failed.
///
/// Every failure leaves storage untouched. Fatal variants signal broken
/// stored state rather than a bad request.
#[derive(Debug, Clone, derive_more::Display)]
pub enum KeeperError {
    /// The new game record is malformed.
    #[display("{}", _0)]
    Validation(ValidationError),

    /// No stored game has this id.
    #[display("game by id not found: {}", _0)]
    GameNotFound(String),

    /// The identity may not move now.
    #[display("player tried to play out of turn: {} (turn: {})", identity, turn)]
    OutOfTurn {
        /// Identity that submitted the move.
        identity: String,
        /// Side on move.
        turn: Player,
    },

    /// The rules rejected the move.
    #[display("{}: wrong move", _0)]
    WrongMove(MoveError),

    /// A stored board or turn cannot be decoded.
    #[display("game cannot be parsed: {}", _0)]
    MalformedBoard(CodecError),

    /// The next-id counter is missing.
    #[display("nextGame not found")]
    MissingNextGame,

    /// Genesis was already written; the stored counter is attached.
    #[display("store already initialized, nextGame is {}", _0)]
    AlreadyInitialized(u64),

    /// The counter points at an id a stored game already uses.
    #[display("game id already in use: {}", _0)]
    GameIdInUse(String),

    /// The store failed.
    #[display("{}", _0)]
    Store(StoreError),

    /// A stored record cannot be decoded or encoded.
    #[display("record cannot be decoded: {}", _0)]
    Record(String),

    /// Genesis state is inconsistent.
    #[display("{}", _0)]
    Genesis(GenesisError),
}

impl KeeperError {
    /// Returns true for failures caused by broken stored state or storage
    /// rather than by the request.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            KeeperError::MalformedBoard(_)
                | KeeperError::MissingNextGame
                | KeeperError::GameIdInUse(_)
                | KeeperError::Store(_)
                | KeeperError::Record(_)
        )
    }
}

impl std::error::Error for KeeperError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KeeperError::Validation(e) => Some(e),
            KeeperError::WrongMove(e) => Some(e),
            KeeperError::MalformedBoard(e) => Some(e),
            KeeperError::Store(e) => Some(e),
            KeeperError::Genesis(e) => Some(e),
            KeeperError::GameNotFound(_)
            | KeeperError::OutOfTurn { .. }
            | KeeperError::MissingNextGame
            | KeeperError::AlreadyInitialized(_)
            | KeeperError::GameIdInUse(_)
            | KeeperError::Record(_) => None,
        }
    }
}

impl From<ValidationError> for KeeperError {
    fn from(err: ValidationError) -> Self {
        KeeperError::Validation(err)
    }
}

impl From<MoveError> for KeeperError {
    fn from(err: MoveError) -> Self {
        KeeperError::WrongMove(err)
    }
}

impl From<CodecError> for KeeperError {
    fn from(err: CodecError) -> Self {
        KeeperError::MalformedBoard(err)
    }
}

impl From<StoreError> for KeeperError {
    fn from(err: StoreError) -> Self {
        KeeperError::Store(err)
    }
}

impl From<serde_json::Error> for KeeperError {
    fn from(err: serde_json::Error) -> Self {
        KeeperError::Record(err.to_string())
    }
}

impl From<GenesisError> for KeeperError {
    fn from(err: GenesisError) -> Self {
        KeeperError::Genesis(err)
    }
}
