//! Price Service Module
//!
//! The upstream lookup the cache sits in front of.

mod simulated;

use async_trait::async_trait;

pub use simulated::SimulatedPriceService;

// == Price Service ==
/// An expensive source of prices for item codes.
///
/// Implementations must tolerate concurrent calls, including concurrent
/// calls for the same item code.
#[async_trait]
pub trait PriceService: Send + Sync {
    /// Looks up the current price for `item_code`.
    async fn get_price_for(&self, item_code: &str) -> anyhow::Result<f64>;
}
