use chrono::{DateTime, Utc};
use serde::Serialize;

use super::config::WindowMinutes;
use super::matrix::CorrelationMatrix;
use super::summary::SeriesSummary;
use super::ticker::Ticker;

/// Everything a dashboard renders for one published window.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub generation: u64,
    pub window: WindowMinutes,
    pub fetched_at: DateTime<Utc>,
    /// Axis labels for `matrix`, in row/column order.
    pub tickers: Vec<Ticker>,
    pub matrix: CorrelationMatrix,
    pub summaries: Vec<SeriesSummary>,
}
