//! Price Cache - a transparent read-through cache for slow price lookups
//!
//! Remembers prices for a configurable freshness window and fetches batches
//! of prices in parallel under a fixed concurrency cap.

pub mod cache;
pub mod config;
pub mod error;
pub mod service;

pub use cache::TransparentCache;
pub use config::Config;
pub use error::{CacheError, Result};
pub use service::PriceService;
