//! Cache Entry Module
//!
//! Defines the remembered result of a single upstream price lookup.

use std::time::Duration;

use tokio::time::Instant;

// == Cached Price ==
/// A price as returned by the upstream service, stamped with when it was stored.
///
/// Entries are never modified in place; a refresh replaces the whole entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedPrice {
    /// The fetched price
    pub price: f64,
    /// When the price was written to the store
    pub stored_at: Instant,
}

impl CachedPrice {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(price: f64) -> Self {
        Self::at(price, Instant::now())
    }

    /// Creates an entry stamped with an explicit time.
    pub fn at(price: f64, stored_at: Instant) -> Self {
        Self { price, stored_at }
    }

    // == Age ==
    /// Time elapsed between storing this entry and `now`.
    ///
    /// Saturates to zero if `now` is earlier than `stored_at`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.stored_at)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_new_is_stamped_now() {
        let entry = CachedPrice::new(10.0);

        assert_eq!(entry.price, 10.0);
        assert_eq!(entry.age(Instant::now()), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_age_advances_with_clock() {
        let entry = CachedPrice::new(10.0);

        tokio::time::advance(Duration::from_millis(750)).await;

        assert_eq!(entry.age(Instant::now()), Duration::from_millis(750));
    }

    #[test]
    fn test_entry_age_saturates_before_stored_at() {
        let now = Instant::now();
        let entry = CachedPrice::at(1.0, now + Duration::from_secs(5));

        assert_eq!(entry.age(now), Duration::ZERO);
    }
}
