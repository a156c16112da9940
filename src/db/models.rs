//! Database models for the key-value table.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;

/// Stored key-value row.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::kv_entries)]
pub struct KvEntry {
    key: String,
    value: String,
    updated_at: NaiveDateTime,
}

/// Insertable row for upserting a key.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::kv_entries)]
pub struct NewKvEntry {
    key: String,
    value: String,
    updated_at: NaiveDateTime,
}
