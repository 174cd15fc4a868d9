use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::PriceSource;
use crate::errors::AppError;
use crate::models::config::{SourceConfig, WindowMinutes};
use crate::models::observation::Observation;
use crate::models::ticker::Ticker;

/// Price source backed by the dashboard REST API.
///
/// - `GET {base}/stocks` → `["AAPL", "MSFT", ...]`
/// - `GET {base}/history/{ticker}?minutes={n}` → `[{"time": ..., "price": ...}, ...]`
#[derive(Clone)]
pub struct HttpPriceSource {
    client: Client,
    base_url: Url,
}

impl HttpPriceSource {
    pub fn new(config: &SourceConfig) -> Result<Self, AppError> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AppError::InvalidConfig(format!("base_url: {}", e)))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::InvalidConfig(format!("base_url '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        debug!("GET {}", url);
        let resp = self.client.get(url.clone()).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| AppError::MalformedPayload(format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn list_tickers(&self) -> Result<Vec<Ticker>, AppError> {
        let url = self.endpoint(&["stocks"])?;
        self.get_json(url).await
    }

    async fn fetch_history(
        &self,
        ticker: &Ticker,
        window: WindowMinutes,
    ) -> Result<Vec<Observation>, AppError> {
        let mut url = self.endpoint(&["history", ticker.as_str()])?;
        url.query_pairs_mut()
            .append_pair("minutes", &window.get().to_string());
        self.get_json(url).await
    }
}
