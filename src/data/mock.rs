//! Scripted in-memory price source for tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::Semaphore;

use super::PriceSource;
use crate::errors::AppError;
use crate::models::config::WindowMinutes;
use crate::models::observation::Observation;
use crate::models::ticker::Ticker;

/// Build one observation per price, one minute apart.
pub fn observations(prices: &[f64]) -> Vec<Observation> {
    let start = Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap();
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| Observation::new(start + chrono::Duration::minutes(i as i64), price))
        .collect()
}

#[derive(Default)]
pub struct MockSource {
    tickers: Vec<Ticker>,
    prices: HashMap<Ticker, Vec<f64>>,
    window_prices: HashMap<(Ticker, u32), Vec<f64>>,
    failing: HashSet<Ticker>,
    failing_windows: HashSet<(Ticker, u32)>,
    fail_listing: bool,
    delay: Option<Duration>,
    gates: HashMap<u32, Arc<Semaphore>>,
    list_calls: AtomicUsize,
    history_calls: Mutex<Vec<(Ticker, u32)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a ticker with the series returned for every window.
    pub fn with_series(mut self, ticker: &str, prices: &[f64]) -> Self {
        let ticker = Ticker::from(ticker);
        if !self.tickers.contains(&ticker) {
            self.tickers.push(ticker.clone());
        }
        self.prices.insert(ticker, prices.to_vec());
        self
    }

    /// Override the series returned for one specific window.
    pub fn with_window_series(mut self, ticker: &str, minutes: u32, prices: &[f64]) -> Self {
        self.window_prices
            .insert((Ticker::from(ticker), minutes), prices.to_vec());
        self
    }

    pub fn with_failure(mut self, ticker: &str) -> Self {
        self.failing.insert(Ticker::from(ticker));
        self
    }

    /// Fail `ticker` only when requested with `minutes`.
    pub fn with_window_failure(mut self, ticker: &str, minutes: u32) -> Self {
        self.failing_windows.insert((Ticker::from(ticker), minutes));
        self
    }

    pub fn with_failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// History requests for `minutes` block until `open_gate(minutes)`.
    pub fn with_gate(mut self, minutes: u32) -> Self {
        self.gates.insert(minutes, Arc::new(Semaphore::new(0)));
        self
    }

    pub fn open_gate(&self, minutes: u32) {
        if let Some(gate) = self.gates.get(&minutes) {
            gate.add_permits(1);
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn history_calls(&self) -> Vec<(Ticker, u32)> {
        self.history_calls.lock().unwrap().clone()
    }

    pub fn calls_for_window(&self, minutes: u32) -> usize {
        self.history_calls()
            .iter()
            .filter(|(_, m)| *m == minutes)
            .count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Wait until `count` history requests for `minutes` have been issued.
    pub async fn wait_for_calls(&self, minutes: u32, count: usize) {
        while self.calls_for_window(minutes) < count {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }
}

#[async_trait]
impl PriceSource for MockSource {
    async fn list_tickers(&self) -> Result<Vec<Ticker>, AppError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            return Err(AppError::HttpStatus {
                url: "mock://stocks".into(),
                status: 500,
            });
        }
        Ok(self.tickers.clone())
    }

    async fn fetch_history(
        &self,
        ticker: &Ticker,
        window: WindowMinutes,
    ) -> Result<Vec<Observation>, AppError> {
        self.history_calls
            .lock()
            .unwrap()
            .push((ticker.clone(), window.get()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(gate) = self.gates.get(&window.get()) {
            let _permit = gate.acquire().await.unwrap();
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(ticker)
            || self.failing_windows.contains(&(ticker.clone(), window.get()))
        {
            return Err(AppError::Network(format!("connection reset fetching {}", ticker)));
        }
        let prices = self
            .window_prices
            .get(&(ticker.clone(), window.get()))
            .or_else(|| self.prices.get(ticker))
            .ok_or_else(|| AppError::HttpStatus {
                url: format!("mock://history/{}", ticker),
                status: 404,
            })?;
        Ok(observations(prices))
    }
}
