//! Simulated Price Service
//!
//! A fixed price table behind an artificial delay, used by the demo binary.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use tracing::debug;

use crate::service::PriceService;

/// Serves prices from an in-memory table after a fixed latency.
///
/// Unknown item codes fail, which makes it easy to demonstrate batch failures.
#[derive(Debug, Clone, Default)]
pub struct SimulatedPriceService {
    prices: HashMap<String, f64>,
    latency: Duration,
}

impl SimulatedPriceService {
    /// Creates a service with no prices and no latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the price for an item code.
    pub fn with_price(mut self, item_code: impl Into<String>, price: f64) -> Self {
        self.prices.insert(item_code.into(), price);
        self
    }

    /// Sets how long each lookup takes.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl PriceService for SimulatedPriceService {
    async fn get_price_for(&self, item_code: &str) -> anyhow::Result<f64> {
        debug!("Simulated lookup for {} ({:?})", item_code, self.latency);
        tokio::time::sleep(self.latency).await;

        self.prices
            .get(item_code)
            .copied()
            .ok_or_else(|| anyhow!("no price listed for item {}", item_code))
    }
}
