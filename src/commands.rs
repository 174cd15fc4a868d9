use tracing::info;

use crate::data::PriceSource;
use crate::engine::dashboard::Published;
use crate::engine::summary::summarize_snapshot;
use crate::errors::AppError;
use crate::models::config::WindowMinutes;
use crate::models::result::DashboardView;
use crate::models::series::Series;
use crate::models::ticker::Ticker;
use crate::AppState;

// ── Ticker Commands ──

/// Tickers for this session, in matrix order.
pub async fn get_tickers<S: PriceSource>(state: &AppState<S>) -> Result<Vec<Ticker>, AppError> {
    let tickers = state.dashboard.tickers().await?;
    Ok(tickers.as_ref().clone())
}

// ── Window Commands ──

/// Change the look-back window and reload everything for it.
///
/// `minutes` is validated before any request is issued.
pub async fn set_window<S: PriceSource>(
    state: &AppState<S>,
    minutes: i64,
) -> Result<DashboardView, AppError> {
    let window = WindowMinutes::new(minutes)?;
    let published = state.dashboard.set_window(window).await?;
    info!(
        "Window {} ready: {} tickers",
        window,
        published.matrix.size()
    );
    Ok(build_view(&published))
}

/// The latest published view, or `None` before the first successful load.
pub async fn get_dashboard<S: PriceSource>(state: &AppState<S>) -> Option<DashboardView> {
    state
        .dashboard
        .current()
        .await
        .map(|published| build_view(&published))
}

/// One ticker's series from the latest published snapshot.
pub async fn get_series<S: PriceSource>(
    state: &AppState<S>,
    ticker: &str,
) -> Result<Series, AppError> {
    let published = state
        .dashboard
        .current()
        .await
        .ok_or_else(|| AppError::NotFound("No snapshot loaded yet".into()))?;
    published
        .snapshot
        .get(&Ticker::from(ticker))
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Ticker {} not in snapshot", ticker)))
}

// ── Helpers ──

fn build_view(published: &Published) -> DashboardView {
    DashboardView {
        generation: published.generation,
        window: published.snapshot.window(),
        fetched_at: published.snapshot.fetched_at(),
        tickers: published.matrix.tickers.clone(),
        matrix: published.matrix.as_ref().clone(),
        summaries: summarize_snapshot(&published.snapshot),
    }
}
