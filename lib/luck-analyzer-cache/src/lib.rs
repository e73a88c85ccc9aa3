use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::types::chrono::Utc;
use sqlx::{Pool, Sqlite};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

// Re-export so that clients can avoid having sqlx as a dependency
pub use sqlx::sqlite::SqlitePoolOptions;

pub mod error;
pub mod model;

pub use error::CacheError;
pub use model::{CacheEntry, CacheStats};

pub const DEFAULT_MEMORY_TTL: Duration = Duration::from_secs(10 * 60);
pub const DEFAULT_DISK_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

type InFlight = std::sync::Mutex<HashMap<String, Arc<OnceCell<String>>>>;

/// Drops a key's in-flight cell once it has settled, or once its last
/// waiter goes away, including when the waiting future is cancelled.
struct InFlightGuard<'a> {
    in_flight: &'a InFlight,
    key: &'a str,
    cell: Arc<OnceCell<String>>,
}

impl<'a> InFlightGuard<'a> {
    fn join(in_flight: &'a InFlight, key: &'a str) -> Self {
        let cell = in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.to_string())
            .or_default()
            .clone();
        Self {
            in_flight,
            key,
            cell,
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(current) = in_flight.get(self.key) else {
            return;
        };
        // Two references left: the map's and ours.
        let last_waiter = Arc::strong_count(&self.cell) <= 2;
        if Arc::ptr_eq(current, &self.cell) && (self.cell.initialized() || last_waiter) {
            in_flight.remove(self.key);
        }
    }
}

#[derive(Debug)]
struct MemoryEntry {
    body: String,
    stored_at: Instant,
}

/// Two-tier cache of JSON bodies: a short-lived in-process map in front of a
/// longer-lived SQLite table. An entry is expired once its age reaches the
/// tier's TTL.
#[derive(Debug)]
pub struct CacheHandler {
    pool: Pool<Sqlite>,
    memory: Mutex<HashMap<String, MemoryEntry>>,
    in_flight: InFlight,
    memory_ttl: Duration,
    disk_ttl: Duration,
}

impl CacheHandler {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            pool,
            memory: Mutex::new(HashMap::new()),
            in_flight: InFlight::default(),
            memory_ttl: DEFAULT_MEMORY_TTL,
            disk_ttl: DEFAULT_DISK_TTL,
        }
    }

    pub fn with_ttl(mut self, memory_ttl: Duration, disk_ttl: Duration) -> Self {
        self.memory_ttl = memory_ttl;
        self.disk_ttl = disk_ttl;
        self
    }

    /// Create the backing table if it does not exist yet.
    pub async fn migrate(&self) -> Result<(), CacheError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS cache_entry (
                key TEXT PRIMARY KEY NOT NULL,
                body TEXT NOT NULL,
                stored_at INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Look a key up in memory, then on disk. A disk hit is promoted back
    /// into memory, and an expired disk entry is deleted.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_body(key).await? {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    /// Store a value in both tiers, replacing any previous entry.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let body = serde_json::to_string(value)?;
        self.set_body(key, body).await
    }

    /// Return the cached value for `key`, or run `fetch` and cache its result.
    ///
    /// Concurrent callers for the same key share a single `fetch`. If it fails,
    /// the error goes to the caller that ran it and nothing is cached.
    pub async fn get_or_fetch<T, E, F, Fut>(&self, key: &str, fetch: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.get(key).await? {
            debug!("Cache hit: {key}");
            return Ok(value);
        }

        let guard = InFlightGuard::join(&self.in_flight, key);
        let result = guard
            .cell
            .get_or_try_init(|| async {
                debug!("Cache miss: {key}");
                let value = fetch().await?;
                let body = serde_json::to_string(&value).map_err(CacheError::from)?;
                self.set_body(key, body.clone()).await?;
                Ok::<String, E>(body)
            })
            .await;

        let body = result?;
        Ok(serde_json::from_str(body).map_err(CacheError::from)?)
    }

    /// Drop every expired entry from both tiers, returning how many disk rows
    /// were removed.
    pub async fn invalidate_expired(&self) -> Result<u64, CacheError> {
        let memory_ttl = self.memory_ttl;
        self.memory
            .lock()
            .await
            .retain(|_, entry| entry.stored_at.elapsed() < memory_ttl);

        let removed = sqlx::query("DELETE FROM cache_entry WHERE stored_at <= ?")
            .bind(self.disk_cutoff())
            .execute(&self.pool)
            .await?
            .rows_affected();
        info!("Cache cleanup removed {removed} expired entries");
        Ok(removed)
    }

    pub async fn clear(&self) -> Result<(), CacheError> {
        self.memory.lock().await.clear();
        sqlx::query("DELETE FROM cache_entry")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn stats(&self) -> Result<CacheStats, CacheError> {
        let (total, valid, size): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*),
                COALESCE(SUM(CASE WHEN stored_at > ? THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(LENGTH(body)), 0)
            FROM cache_entry",
        )
        .bind(self.disk_cutoff())
        .fetch_one(&self.pool)
        .await?;
        let memory_entries = self.memory.lock().await.len() as u64;

        let total = total.max(0) as u64;
        let valid = valid.max(0) as u64;
        Ok(CacheStats {
            total_entries: total,
            valid_entries: valid,
            expired_entries: total.saturating_sub(valid),
            size_bytes: size.max(0) as u64,
            memory_entries,
        })
    }

    async fn get_body(&self, key: &str) -> Result<Option<String>, CacheError> {
        {
            let mut memory = self.memory.lock().await;
            if let Some(entry) = memory.get(key) {
                if entry.stored_at.elapsed() < self.memory_ttl {
                    return Ok(Some(entry.body.clone()));
                }
                memory.remove(key);
            }
        }

        let entry: Option<CacheEntry> =
            sqlx::query_as("SELECT key, body, stored_at FROM cache_entry WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        let Some(entry) = entry else {
            return Ok(None);
        };

        if entry.stored_at <= self.disk_cutoff() {
            debug!("Dropping expired cache entry: {key}");
            sqlx::query("DELETE FROM cache_entry WHERE key = ?")
                .bind(key)
                .execute(&self.pool)
                .await?;
            return Ok(None);
        }

        self.memory.lock().await.insert(
            entry.key,
            MemoryEntry {
                body: entry.body.clone(),
                stored_at: Instant::now(),
            },
        );
        Ok(Some(entry.body))
    }

    async fn set_body(&self, key: &str, body: String) -> Result<(), CacheError> {
        sqlx::query(
            "INSERT INTO cache_entry (key, body, stored_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET body = excluded.body, stored_at = excluded.stored_at",
        )
        .bind(key)
        .bind(&body)
        .bind(Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await?;

        self.memory.lock().await.insert(
            key.to_string(),
            MemoryEntry {
                body,
                stored_at: Instant::now(),
            },
        );
        Ok(())
    }

    /// Disk entries stored at or before this instant are expired.
    fn disk_cutoff(&self) -> i64 {
        let ttl_ms = i64::try_from(self.disk_ttl.as_millis()).unwrap_or(i64::MAX);
        Utc::now().timestamp_millis().saturating_sub(ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    async fn cache() -> CacheHandler {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let cache = CacheHandler::new(pool);
        cache.migrate().await.unwrap();
        cache
    }

    fn in_flight_keys(cache: &CacheHandler) -> usize {
        cache.in_flight.lock().unwrap().len()
    }

    #[tokio::test]
    async fn cancelled_fetch_leaves_nothing_in_flight() {
        let cache = cache().await;
        let (started, has_started) = oneshot::channel();

        let mut fetch = Box::pin(cache.get_or_fetch("match_EUW1_1", || async move {
            let _ = started.send(());
            std::future::pending::<Result<String, CacheError>>().await
        }));
        tokio::select! {
            _ = &mut fetch => panic!("fetch should never settle"),
            _ = has_started => {}
        }
        assert_eq!(in_flight_keys(&cache), 1);

        drop(fetch);
        assert_eq!(in_flight_keys(&cache), 0);
        assert_eq!(cache.get::<String>("match_EUW1_1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn cancelled_waiter_keeps_running_fetch_shared() {
        let cache = cache().await;
        let (started, has_started) = oneshot::channel();
        let (release, released) = oneshot::channel::<()>();

        let mut leader = Box::pin(cache.get_or_fetch("match_EUW1_2", || async move {
            let _ = started.send(());
            let _ = released.await;
            Ok::<_, CacheError>("leader".to_string())
        }));
        tokio::select! {
            _ = &mut leader => panic!("leader should wait for release"),
            _ = has_started => {}
        }

        let waiter = cache.get_or_fetch("match_EUW1_2", || async {
            Ok::<_, CacheError>("waiter".to_string())
        });
        assert!(tokio::time::timeout(Duration::from_millis(10), waiter).await.is_err());
        assert_eq!(in_flight_keys(&cache), 1);

        release.send(()).unwrap();
        assert_eq!(leader.await.unwrap(), "leader");
        assert_eq!(in_flight_keys(&cache), 0);
    }

    #[tokio::test]
    async fn settled_fetch_is_removed() {
        let cache = cache().await;
        let value: String = cache
            .get_or_fetch("summoner_a_b", || async { Ok::<_, CacheError>("a#b".to_string()) })
            .await
            .unwrap();
        assert_eq!(value, "a#b");
        assert_eq!(in_flight_keys(&cache), 0);
    }
}
