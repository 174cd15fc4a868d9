use std::collections::HashSet;
use std::time::Instant;

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use super::PriceSource;
use crate::errors::AppError;
use crate::models::config::WindowMinutes;
use crate::models::series::{Series, SeriesSnapshot};
use crate::models::ticker::Ticker;

/// Loads a consistent snapshot of price series for a set of tickers.
///
/// Every call is a from-scratch refresh; nothing is cached between calls.
pub struct SeriesStore<S> {
    source: S,
}

impl<S: PriceSource> SeriesStore<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch every ticker's history for `window` concurrently.
    ///
    /// All-or-nothing: the first failed retrieval aborts the others and is
    /// returned as-is, so no partial snapshot ever escapes. Duplicate tickers
    /// collapse onto their first appearance.
    pub async fn load(
        &self,
        tickers: &[Ticker],
        window: WindowMinutes,
    ) -> Result<SeriesSnapshot, AppError> {
        let tickers = dedupe(tickers);
        let start = Instant::now();
        info!("Loading {} tickers for window {}", tickers.len(), window);

        let fetches = tickers.iter().map(|ticker| self.fetch_series(ticker, window));
        let series = try_join_all(fetches).await?;

        let points: usize = series.iter().map(Series::len).sum();
        info!(
            "Loaded {} series ({} observations) for window {} in {:.0}ms",
            series.len(),
            points,
            window,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(SeriesSnapshot::new(window, series))
    }

    async fn fetch_series(&self, ticker: &Ticker, window: WindowMinutes) -> Result<Series, AppError> {
        let mut observations = self
            .source
            .fetch_history(ticker, window)
            .await
            .map_err(|e| {
                warn!("Failed to fetch history for {}: {}", ticker, e);
                e
            })?;

        if !observations.windows(2).all(|w| w[0].time <= w[1].time) {
            warn!("History for {} arrived out of order, sorting by time", ticker);
            observations.sort_by_key(|o| o.time);
        }
        debug!("Fetched {} observations for {}", observations.len(), ticker);

        Ok(Series::new(ticker.clone(), observations))
    }
}

/// Keep the first occurrence of each ticker, preserving order.
pub(crate) fn dedupe(tickers: &[Ticker]) -> Vec<Ticker> {
    let mut seen = HashSet::with_capacity(tickers.len());
    tickers
        .iter()
        .filter(|t| seen.insert(*t))
        .cloned()
        .collect()
}
