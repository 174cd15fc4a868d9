use serde::{Deserialize, Serialize};

use super::ticker::Ticker;

/// Descriptive statistics for one ticker's series, backing its price panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub ticker: Ticker,
    pub points: usize,
    pub first: f64,
    pub last: f64,
    pub min: f64,
    pub max: f64,
    /// `(last - first) / first * 100`, 0 when `first` is 0.
    pub change_pct: f64,
    pub mean: f64,
    /// Sample standard deviation; 0 with fewer than two points.
    pub std_dev: f64,
}

impl SeriesSummary {
    /// Summary of a series with no observations.
    pub fn empty(ticker: Ticker) -> Self {
        Self {
            ticker,
            points: 0,
            first: 0.0,
            last: 0.0,
            min: 0.0,
            max: 0.0,
            change_pct: 0.0,
            mean: 0.0,
            std_dev: 0.0,
        }
    }
}
