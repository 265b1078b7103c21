//! Price Store Module
//!
//! Thread-safe key to price storage with freshness evaluation.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::cache::CachedPrice;

// == Price Store ==
/// Concurrent map from item code to its last fetched price.
///
/// Reads share the lock, writes take it exclusively. Entries are only ever
/// superseded, never removed, so the store grows with the set of distinct
/// item codes it has seen.
#[derive(Debug)]
pub struct PriceStore {
    /// Item code to cached price
    entries: RwLock<HashMap<String, CachedPrice>>,
    /// Freshness window applied by `is_expired`
    max_age: Duration,
}

impl PriceStore {
    // == Constructor ==
    /// Creates an empty store with the given freshness window.
    pub fn new(max_age: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_age,
        }
    }

    // == Read ==
    /// Returns the entry for `item_code`, if one has ever been written.
    ///
    /// Does not judge freshness; see [`PriceStore::is_expired`].
    pub async fn read(&self, item_code: &str) -> Option<CachedPrice> {
        self.entries.read().await.get(item_code).copied()
    }

    // == Write ==
    /// Inserts or replaces the entry for `item_code`. Last writer wins.
    pub async fn write(&self, item_code: String, entry: CachedPrice) {
        self.entries.write().await.insert(item_code, entry);
    }

    // == Is Expired ==
    /// Checks whether `entry` is stale at `now`.
    ///
    /// An entry is fresh while `stored_at + max_age > now`, so it expires the
    /// moment its age reaches `max_age`.
    pub fn is_expired(&self, entry: &CachedPrice, now: Instant) -> bool {
        entry.age(now) >= self.max_age
    }

    // == Max Age ==
    /// Returns the freshness window.
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    // == Length ==
    /// Returns the number of distinct item codes stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if nothing has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
