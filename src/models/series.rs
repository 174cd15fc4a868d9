use chrono::{DateTime, Utc};
use serde::Serialize;

use super::config::WindowMinutes;
use super::observation::Observation;
use super::ticker::Ticker;

/// Time-ordered price observations for one ticker over one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub ticker: Ticker,
    pub observations: Vec<Observation>,
}

impl Series {
    pub fn new(ticker: Ticker, observations: Vec<Observation>) -> Self {
        Self { ticker, observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Prices in observation order.
    pub fn prices(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.price).collect()
    }
}

/// All series fetched under one window value, in the caller's ticker order.
///
/// A snapshot is never modified after construction; a new window produces a
/// new snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesSnapshot {
    window: WindowMinutes,
    fetched_at: DateTime<Utc>,
    series: Vec<Series>,
}

impl SeriesSnapshot {
    pub fn new(window: WindowMinutes, series: Vec<Series>) -> Self {
        Self {
            window,
            fetched_at: Utc::now(),
            series,
        }
    }

    pub fn window(&self) -> WindowMinutes {
        self.window
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Tickers in insertion order.
    pub fn tickers(&self) -> Vec<Ticker> {
        self.series.iter().map(|s| s.ticker.clone()).collect()
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn get(&self, ticker: &Ticker) -> Option<&Series> {
        self.series.iter().find(|s| &s.ticker == ticker)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
