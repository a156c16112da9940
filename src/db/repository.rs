//! SQLite-backed key-value store.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{KvEntry, NewKvEntry, schema};
use crate::store::{KvStore, StoreError};

/// Schema migrations applied when a store is opened.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Key-value store kept in a SQLite database file.
///
/// Each call opens its own connection, so the path must name a file;
/// `":memory:"` would lose everything between calls.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StoreError> {
        info!(path = %db_path, "Opening SqliteStore");
        let store = Self { db_path };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migrations failed: {}", e)))?;
        debug!(count = applied.len(), "Migrations applied");
        Ok(store)
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e))
        })
    }
}

/// Inserts or replaces one key.
fn upsert(conn: &mut SqliteConnection, key: &str, value: &str) -> Result<(), StoreError> {
    let entry = NewKvEntry::new(
        key.to_string(),
        value.to_string(),
        chrono::Utc::now().naive_utc(),
    );
    diesel::insert_into(schema::kv_entries::table)
        .values(&entry)
        .on_conflict(schema::kv_entries::key)
        .do_update()
        .set((
            schema::kv_entries::value.eq(entry.value()),
            schema::kv_entries::updated_at.eq(entry.updated_at()),
        ))
        .execute(conn)
        .map_err(|e| StoreError::from(e).with_key(key))?;
    Ok(())
}

impl KvStore for SqliteStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection()?;
        let entry = schema::kv_entries::table
            .find(key)
            .select(KvEntry::as_select())
            .first::<KvEntry>(&mut conn)
            .optional()
            .map_err(|e| StoreError::from(e).with_key(key))?;

        debug!(found = entry.is_some(), "Key looked up");
        Ok(entry.map(|e| e.value().clone()))
    }

    #[instrument(skip(self, value))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        upsert(&mut conn, key, value)?;
        debug!("Key written");
        Ok(())
    }

    #[instrument(skip(self))]
    fn iter_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, StoreError> {
        let mut conn = self.connection()?;
        // LIKE is case-insensitive in SQLite, so the prefix is rechecked below.
        let entries = schema::kv_entries::table
            .filter(schema::kv_entries::key.like(format!("{}%", prefix)))
            .order(schema::kv_entries::key.asc())
            .select(KvEntry::as_select())
            .load::<KvEntry>(&mut conn)
            .map_err(|e| StoreError::from(e).with_key(prefix))?;

        let matched: Vec<(String, String)> = entries
            .into_iter()
            .filter(|e| e.key().starts_with(prefix))
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        debug!(count = matched.len(), "Prefix scanned");
        Ok(matched)
    }

    #[instrument(skip(self, entries), fields(count = entries.len()))]
    fn write_batch(&mut self, entries: Vec<(String, String)>) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        conn.transaction::<_, StoreError, _>(|conn| {
            for (key, value) in &entries {
                upsert(conn, key, value)?;
            }
            Ok(())
        })?;
        info!(count = entries.len(), "Batch committed");
        Ok(())
    }
}
