//! Tests for the SQLite key-value store.

use diesel::{Connection, RunQueryDsl, SqliteConnection};
use tempfile::NamedTempFile;

use checkers_keeper::{
    AnyIdentity, EventManager, GenesisState, Keeper, KvStore, MsgCreateGame, MsgPlayMove, Rules,
    SqliteStore,
};

/// Creates a temporary database file and opens a store on it. The file
/// handle must stay in scope to keep the file alive.
fn setup_test_db() -> (NamedTempFile, SqliteStore) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let store = SqliteStore::open(db_path).expect("Failed to open store");
    (db_file, store)
}

#[test]
fn test_get_missing_key() {
    let (_db, store) = setup_test_db();
    assert_eq!(store.get("NextGame-value-").expect("Get failed"), None);
}

#[test]
fn test_set_then_overwrite() {
    let (_db, mut store) = setup_test_db();
    store.set("k", "one").expect("Set failed");
    store.set("k", "two").expect("Overwrite failed");
    assert_eq!(store.get("k").expect("Get failed").as_deref(), Some("two"));
}

#[test]
fn test_iter_prefix_is_case_sensitive_and_ordered() {
    let (_db, mut store) = setup_test_db();
    store
        .write_batch(vec![
            ("StoredGame-value-2".to_string(), "b".to_string()),
            ("StoredGame-value-1".to_string(), "a".to_string()),
            ("storedgame-value-3".to_string(), "c".to_string()),
            ("NextGame-value-".to_string(), "n".to_string()),
        ])
        .expect("Batch failed");

    let entries = store.iter_prefix("StoredGame-value-").expect("Scan failed");
    assert_eq!(
        entries,
        vec![
            ("StoredGame-value-1".to_string(), "a".to_string()),
            ("StoredGame-value-2".to_string(), "b".to_string()),
        ]
    );
}

#[test]
fn test_reopen_keeps_data() {
    let (db, mut store) = setup_test_db();
    store.set("k", "v").expect("Set failed");

    let db_path = db.path().to_str().expect("Invalid path").to_string();
    let reopened = SqliteStore::open(db_path).expect("Reopen failed");
    assert_eq!(reopened.get("k").expect("Get failed").as_deref(), Some("v"));
}

#[test]
fn test_failures_name_the_key() {
    let (db, mut store) = setup_test_db();
    let db_path = db.path().to_str().expect("Invalid path");
    let mut conn = SqliteConnection::establish(db_path).expect("Connect failed");
    diesel::sql_query("DROP TABLE kv_entries")
        .execute(&mut conn)
        .expect("Drop failed");

    let err = store.get("StoredGame-value-4").expect_err("table is gone");
    assert_eq!(err.key.as_deref(), Some("StoredGame-value-4"));
    assert!(err.to_string().contains("key 'StoredGame-value-4'"));

    let err = store.set("NextGame-value-", "{}").expect_err("table is gone");
    assert_eq!(err.key.as_deref(), Some("NextGame-value-"));
}

#[test]
fn test_keeper_over_sqlite() {
    let (db, store) = setup_test_db();
    let mut keeper = Keeper::new(store, AnyIdentity, Rules::default());
    keeper
        .init_genesis(&GenesisState::default())
        .expect("Genesis failed");

    let mut events = EventManager::new();
    let created = keeper
        .create_game(
            &MsgCreateGame::new("alice".to_string(), "bob".to_string(), "carol".to_string()),
            &mut events,
        )
        .expect("Create failed");
    keeper
        .play_move(
            &MsgPlayMove::new("carol".to_string(), created.id_value.clone(), 1, 2, 2, 3),
            &mut events,
        )
        .expect("Move failed");

    let db_path = db.path().to_str().expect("Invalid path").to_string();
    let reopened = Keeper::new(
        SqliteStore::open(db_path).expect("Reopen failed"),
        AnyIdentity,
        Rules::default(),
    );
    let stored = reopened.stored_game(&created.id_value).expect("Game missing");
    assert_eq!(stored.turn(), "r");
    assert_eq!(*stored.move_count(), 1);
    assert_eq!(reopened.next_game().expect("Counter missing").id_value, 2);
    assert_eq!(
        reopened.export_genesis().expect("Export failed").stored_game_list,
        vec![stored]
    );
}
