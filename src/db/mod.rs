//! SQLite persistence for the key-value store.

mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use models::{KvEntry, NewKvEntry};
pub use repository::{MIGRATIONS, SqliteStore};
