//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::error::{CacheError, Result};

/// Default freshness window for cached prices.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(300);

/// Default number of upstream lookups a batch may run at once.
pub const DEFAULT_MAX_PARALLEL: usize = 4;

/// Cache configuration parameters.
///
/// Both values are fixed once a cache is built from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How long a fetched price stays fresh
    pub max_age: Duration,
    /// Maximum concurrent upstream lookups during a batch
    pub max_parallel: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PRICE_CACHE_MAX_AGE_MS` - Freshness window in milliseconds (default: 300000)
    /// - `PRICE_CACHE_MAX_PARALLEL` - Concurrent upstream lookups (default: 4)
    ///
    /// Unset variables fall back to defaults. A variable that is set but
    /// cannot be parsed is an error rather than silently ignored.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(ms) = parse_var::<u64>("PRICE_CACHE_MAX_AGE_MS")? {
            config.max_age = Duration::from_millis(ms);
        }
        if let Some(max_parallel) = parse_var::<usize>("PRICE_CACHE_MAX_PARALLEL")? {
            config.max_parallel = max_parallel;
        }

        config.validate()?;
        Ok(config)
    }

    /// Sets the freshness window.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Sets the batch concurrency cap.
    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = max_parallel;
        self
    }

    /// Rejects settings that could never make progress.
    pub fn validate(&self) -> Result<()> {
        if self.max_parallel == 0 {
            return Err(CacheError::InvalidConfig(
                "max_parallel must be at least 1".to_string(),
            ));
        }
        if self.max_parallel > Semaphore::MAX_PERMITS {
            return Err(CacheError::InvalidConfig(format!(
                "max_parallel must not exceed {}",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
            max_parallel: DEFAULT_MAX_PARALLEL,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CacheError::InvalidConfig(format!("{} has invalid value {:?}", name, raw))),
        Err(_) => Ok(None),
    }
}
