//! Transparent Cache Module
//!
//! Read-through price cache wrapping a [`PriceService`], with bounded
//! parallel batch lookups.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cache::{CachedPrice, PriceStore};
use crate::config::{Config, DEFAULT_MAX_PARALLEL};
use crate::error::{CacheError, Result};
use crate::service::PriceService;

// == Transparent Cache ==
/// Remembers prices fetched from the wrapped service so repeated lookups
/// within `max_age` do not pay for another upstream call.
///
/// Cloning is cheap; clones share the store, the service and the batch
/// concurrency limit.
///
/// Concurrent lookups of the same missing or stale item may each call the
/// service. The last write to the store wins.
#[derive(Clone)]
pub struct TransparentCache {
    /// Upstream price source
    service: Arc<dyn PriceService>,
    /// Fetched prices with their timestamps
    store: Arc<PriceStore>,
    /// Slots gating batch lookups
    slots: Arc<Semaphore>,
    /// Number of slots in `slots`
    max_parallel: usize,
}

impl TransparentCache {
    // == Constructors ==
    /// Creates a cache over `service` that keeps prices for `max_age`,
    /// allowing the default number of parallel lookups per batch.
    pub fn new(service: Arc<dyn PriceService>, max_age: Duration) -> Self {
        Self::build(service, max_age, DEFAULT_MAX_PARALLEL)
    }

    /// Creates a cache with an explicit concurrency cap.
    ///
    /// Fails if `max_parallel` is zero or above `Semaphore::MAX_PERMITS`.
    pub fn with_max_parallel(
        service: Arc<dyn PriceService>,
        max_age: Duration,
        max_parallel: usize,
    ) -> Result<Self> {
        let config = Config::default()
            .with_max_age(max_age)
            .with_max_parallel(max_parallel);
        Self::from_config(service, &config)
    }

    /// Creates a cache from a [`Config`].
    pub fn from_config(service: Arc<dyn PriceService>, config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(service, config.max_age, config.max_parallel))
    }

    fn build(service: Arc<dyn PriceService>, max_age: Duration, max_parallel: usize) -> Self {
        Self {
            service,
            store: Arc::new(PriceStore::new(max_age)),
            slots: Arc::new(Semaphore::new(max_parallel)),
            max_parallel,
        }
    }

    // == Get Price ==
    /// Returns the price for `item_code`, from the store when fresh and from
    /// the service otherwise.
    ///
    /// A failed lookup leaves the store untouched.
    pub async fn get_price_for(&self, item_code: &str) -> Result<f64> {
        match self.store.read(item_code).await {
            Some(entry) if !self.store.is_expired(&entry, Instant::now()) => {
                debug!("Cache hit for {}", item_code);
                return Ok(entry.price);
            }
            Some(_) => debug!("Cached price for {} expired, refetching", item_code),
            None => debug!("Cache miss for {}", item_code),
        }

        let price = self
            .service
            .get_price_for(item_code)
            .await
            .map_err(|source| {
                warn!("Price lookup for {} failed: {:#}", item_code, source);
                CacheError::LookupFailed {
                    item_code: item_code.to_string(),
                    source,
                }
            })?;

        self.store
            .write(item_code.to_string(), CachedPrice::new(price))
            .await;
        Ok(price)
    }

    // == Get Prices ==
    /// Returns the prices for all `item_codes`, in input order.
    ///
    /// Every item is looked up in its own task, at most `max_parallel` at a
    /// time. All tasks run to completion before this returns. If any lookup
    /// fails, no prices are returned and the error carries the failure count.
    /// Duplicate item codes are looked up independently.
    pub async fn get_prices_for<S: AsRef<str>>(&self, item_codes: &[S]) -> Result<Vec<f64>> {
        if item_codes.is_empty() {
            return Ok(Vec::new());
        }

        let handles: Vec<_> = item_codes
            .iter()
            .map(|item_code| {
                let cache = self.clone();
                let item_code = item_code.as_ref().to_string();
                tokio::spawn(async move { cache.get_price_in_slot(&item_code).await })
            })
            .collect();

        // join_all yields in handle order, not completion order
        let outcomes = join_all(handles).await;

        let total = outcomes.len();
        let mut prices = Vec::with_capacity(total);
        let mut errors = Vec::new();
        for (item_code, outcome) in item_codes.iter().zip(outcomes) {
            match outcome {
                Ok(Ok(price)) => prices.push(price),
                Ok(Err(err)) => errors.push(err),
                Err(join_err) => errors.push(CacheError::Internal(format!(
                    "lookup task for {} did not complete: {}",
                    item_code.as_ref(),
                    join_err
                ))),
            }
        }

        if !errors.is_empty() {
            warn!("{} of {} price lookups failed", errors.len(), total);
            return Err(CacheError::BatchFailed {
                failures: errors.len(),
                total,
                errors,
            });
        }

        debug!("Fetched {} prices", total);
        Ok(prices)
    }

    /// Single-item lookup holding one batch slot for its whole duration.
    async fn get_price_in_slot(&self, item_code: &str) -> Result<f64> {
        let _permit = self
            .slots
            .acquire()
            .await
            .map_err(|_| CacheError::Internal("batch slot limiter closed".to_string()))?;
        self.get_price_for(item_code).await
    }

    // == Accessors ==
    /// Returns the freshness window.
    pub fn max_age(&self) -> Duration {
        self.store.max_age()
    }

    /// Returns the batch concurrency cap.
    pub fn max_parallel(&self) -> usize {
        self.max_parallel
    }

    /// Returns how many distinct item codes have a stored price.
    pub async fn cached_items(&self) -> usize {
        self.store.len().await
    }
}

impl fmt::Debug for TransparentCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransparentCache")
            .field("max_age", &self.max_age())
            .field("max_parallel", &self.max_parallel)
            .finish_non_exhaustive()
    }
}
