use statrs::statistics::Statistics;

use crate::models::series::{Series, SeriesSnapshot};
use crate::models::summary::SeriesSummary;

/// Descriptive statistics for one series.
pub fn summarize(series: &Series) -> SeriesSummary {
    let prices = series.prices();
    let (Some(&first), Some(&last)) = (prices.first(), prices.last()) else {
        return SeriesSummary::empty(series.ticker.clone());
    };

    let change_pct = if first != 0.0 {
        (last - first) / first * 100.0
    } else {
        0.0
    };
    let std_dev = if prices.len() > 1 {
        prices.iter().std_dev()
    } else {
        0.0
    };

    SeriesSummary {
        ticker: series.ticker.clone(),
        points: prices.len(),
        first,
        last,
        min: Statistics::min(prices.iter()),
        max: Statistics::max(prices.iter()),
        change_pct,
        mean: prices.iter().mean(),
        std_dev,
    }
}

/// Summaries for every series, in snapshot order.
pub fn summarize_snapshot(snapshot: &SeriesSnapshot) -> Vec<SeriesSummary> {
    snapshot.series().iter().map(summarize).collect()
}
