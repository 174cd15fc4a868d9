pub mod commands;
pub mod data;
pub mod engine;
pub mod errors;
pub mod models;
pub mod utils;

use tracing::info;
use tracing_subscriber::EnvFilter;

use data::http::HttpPriceSource;
use engine::dashboard::Dashboard;
use errors::AppError;
use models::config::AppConfig;

/// Shared application state, handed to every command.
pub struct AppState<S = HttpPriceSource> {
    pub config: AppConfig,
    pub dashboard: Dashboard<S>,
}

impl AppState<HttpPriceSource> {
    /// Validate `config` and wire up the HTTP price source.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        config.validate()?;
        let source = HttpPriceSource::new(&config.source)?;
        info!("Price source at {}", source.base_url());
        Ok(Self::with_source(config, source))
    }
}

impl<S: data::PriceSource> AppState<S> {
    pub fn with_source(config: AppConfig, source: S) -> Self {
        Self {
            config,
            dashboard: Dashboard::new(source),
        }
    }
}

/// Initialize tracing. `RUST_LOG` overrides the default `info` level; output
/// goes to stderr so stdout carries only exported data.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
