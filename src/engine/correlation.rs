use rayon::prelude::*;
use tracing::debug;

use crate::models::matrix::CorrelationMatrix;
use crate::models::series::{Series, SeriesSnapshot};

/// RMS deviation, relative to `|mean|`, at or below which a series counts as
/// flat. Absorbs the rounding noise a constant series leaves in its mean
/// without depending on the price scale.
const FLAT_TOLERANCE: f64 = 1e-12;

/// Pearson correlation coefficient of two price sequences.
///
/// Positions are compared index-for-index over `n = min(x.len(), y.len())`;
/// trailing values of the longer sequence are ignored, including for the
/// means. Never NaN:
/// - `n == 0` → 0
/// - either side flat (zero variance) → 0
/// - result clamped to [-1, 1], non-finite results → 0
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let x = &x[..n];
    let y = &y[..n];

    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut cov = 0.0;
    let mut ss_x = 0.0;
    let mut ss_y = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        ss_x += dx * dx;
        ss_y += dy * dy;
    }

    if is_flat(ss_x, mean_x, n) || is_flat(ss_y, mean_y, n) {
        return 0.0;
    }

    let r = cov / (ss_x.sqrt() * ss_y.sqrt());
    if !r.is_finite() {
        return 0.0;
    }
    r.clamp(-1.0, 1.0)
}

/// A ticker against itself: perfectly correlated, flat or not. Zero length
/// still gives 0.
fn self_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.is_empty() || y.is_empty() {
        0.0
    } else {
        1.0
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn is_flat(sum_sq: f64, mean: f64, n: usize) -> bool {
    let limit = n as f64 * (mean.abs() * FLAT_TOLERANCE).powi(2);
    sum_sq <= limit
}

/// Compute the full correlation matrix for a snapshot.
///
/// Rows and columns follow the snapshot's ticker order. Cells pairing a
/// ticker with itself are 1.0 even when it appears twice. Only the upper
/// triangle is evaluated; the lower triangle mirrors it, so the result is
/// exactly symmetric. Pure and deterministic: each cell is the same
/// sequential computation regardless of how rows are scheduled.
pub fn compute(snapshot: &SeriesSnapshot) -> CorrelationMatrix {
    let prices: Vec<Vec<f64>> = snapshot.series().iter().map(Series::prices).collect();
    let tickers = snapshot.tickers();
    let n = prices.len();

    let upper: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            (i..n)
                .map(|j| {
                    if tickers[i] == tickers[j] {
                        self_correlation(&prices[i], &prices[j])
                    } else {
                        pearson(&prices[i], &prices[j])
                    }
                })
                .collect()
        })
        .collect();

    let mut values = vec![vec![0.0; n]; n];
    for (i, row) in upper.into_iter().enumerate() {
        for (offset, r) in row.into_iter().enumerate() {
            let j = i + offset;
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    debug!("Computed {}x{} correlation matrix for window {}", n, n, snapshot.window());

    CorrelationMatrix {
        window: snapshot.window(),
        tickers,
        values,
    }
}

// ══════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════
