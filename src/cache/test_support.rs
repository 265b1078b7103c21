//! Test doubles for the price service.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;

use crate::service::PriceService;

/// Price service whose answers, failures and latency are scripted per item.
///
/// Successive calls for an item walk through its scripted prices; the last
/// price repeats once the script runs out. Every call is counted, and the
/// peak number of overlapping calls is recorded.
#[derive(Debug, Default)]
pub struct ScriptedPriceService {
    prices: HashMap<String, Vec<f64>>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    calls: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedPriceService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prices(mut self, item_code: &str, prices: &[f64]) -> Self {
        self.prices.insert(item_code.to_string(), prices.to_vec());
        self
    }

    pub fn with_failure(mut self, item_code: &str) -> Self {
        self.failing.insert(item_code.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    pub fn with_item_delay(mut self, item_code: &str, delay: Duration) -> Self {
        self.delays.insert(item_code.to_string(), delay);
        self
    }

    pub fn calls_for(&self, item_code: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(item_code)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceService for ScriptedPriceService {
    async fn get_price_for(&self, item_code: &str) -> anyhow::Result<f64> {
        let call_index = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(item_code.to_string()).or_insert(0);
            *count += 1;
            *count - 1
        };

        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        let delay = self
            .delays
            .get(item_code)
            .copied()
            .unwrap_or(self.default_delay);
        tokio::time::sleep(delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(item_code) {
            return Err(anyhow!("upstream refused {}", item_code));
        }
        match self.prices.get(item_code) {
            Some(script) if !script.is_empty() => {
                Ok(script[call_index.min(script.len() - 1)])
            }
            _ => Err(anyhow!("no price scripted for {}", item_code)),
        }
    }
}
