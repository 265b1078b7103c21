//! Price Cache demo
//!
//! Runs a transparent cache in front of a simulated slow price service and
//! shows cached batches, refreshes and failed batches in the log output.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use price_cache::service::SimulatedPriceService;
use price_cache::{Config, TransparentCache};

/// Main entry point for the demo.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Fetch one batch cold, then again from the cache
/// 4. Fetch a batch containing an unknown item and report the failure
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "price_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("loading cache configuration")?;
    info!(
        "Configuration loaded: max_age={:?}, max_parallel={}",
        config.max_age, config.max_parallel
    );

    let service = SimulatedPriceService::new()
        .with_price("apple", 0.5)
        .with_price("bread", 2.25)
        .with_price("cheese", 7.8)
        .with_price("dates", 4.1)
        .with_price("eggs", 3.0)
        .with_latency(Duration::from_millis(250));
    let cache = TransparentCache::from_config(Arc::new(service), &config)?;

    let basket = ["apple", "bread", "cheese", "dates", "eggs"];
    for pass in ["cold", "warm"] {
        let started = Instant::now();
        let prices = cache.get_prices_for(&basket).await?;
        info!(
            "{} batch: {:?} in {}ms",
            pass,
            prices,
            started.elapsed().as_millis()
        );
    }

    match cache.get_prices_for(&["apple", "figs"]).await {
        Ok(prices) => info!("Unexpected success: {:?}", prices),
        Err(err) => warn!("Batch with unknown item failed: {}", err),
    }

    info!("{} items cached", cache.cached_items().await);
    Ok(())
}
