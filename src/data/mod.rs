pub mod http;
#[cfg(test)]
pub(crate) mod mock;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::config::WindowMinutes;
use crate::models::observation::Observation;
use crate::models::ticker::Ticker;

/// External provider of the ticker list and per-ticker price history.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// All tickers available in this session, in display order.
    async fn list_tickers(&self) -> Result<Vec<Ticker>, AppError>;

    /// Price history for `ticker` over the trailing `window`, oldest first.
    async fn fetch_history(
        &self,
        ticker: &Ticker,
        window: WindowMinutes,
    ) -> Result<Vec<Observation>, AppError>;
}

#[async_trait]
impl<S: PriceSource + ?Sized> PriceSource for Arc<S> {
    async fn list_tickers(&self) -> Result<Vec<Ticker>, AppError> {
        (**self).list_tickers().await
    }

    async fn fetch_history(
        &self,
        ticker: &Ticker,
        window: WindowMinutes,
    ) -> Result<Vec<Observation>, AppError> {
        (**self).fetch_history(ticker, window).await
    }
}
