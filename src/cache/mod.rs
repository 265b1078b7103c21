//! Cache Module
//!
//! Provides the freshness-tracked price store and the read-through cache
//! built on top of it.

mod entry;
mod store;
mod transparent;

#[cfg(test)]
mod test_support;

// Re-export public types
pub use entry::CachedPrice;
pub use store::PriceStore;
pub use transparent::TransparentCache;
