use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// A row of the on-disk tier. `stored_at` is a Unix timestamp in milliseconds.
#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub body: String,
    pub stored_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_entries: u64,
    pub valid_entries: u64,
    pub expired_entries: u64,
    /// Combined length of every stored body.
    pub size_bytes: u64,
    pub memory_entries: u64,
}
