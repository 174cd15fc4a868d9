use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Default price API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Look-back window in minutes. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct WindowMinutes(u32);

impl WindowMinutes {
    /// Validate a raw window value. Fails fast before any retrieval is issued.
    pub fn new(minutes: i64) -> Result<Self, AppError> {
        if minutes <= 0 || minutes > u32::MAX as i64 {
            return Err(AppError::InvalidWindow(minutes));
        }
        Ok(WindowMinutes(minutes as u32))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for WindowMinutes {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        WindowMinutes::new(value)
    }
}

impl From<WindowMinutes> for u32 {
    fn from(w: WindowMinutes) -> Self {
        w.0
    }
}

impl fmt::Display for WindowMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}

/// Bounds of the window selector offered to users.
///
/// Range enforcement belongs to the caller; the loader accepts any positive
/// window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSlider {
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub default: u32,
}

impl Default for WindowSlider {
    fn default() -> Self {
        Self {
            min: 5,
            max: 120,
            step: 5,
            default: 60,
        }
    }
}

impl WindowSlider {
    /// Clamp to `[min, max]` and round to the nearest step from `min`.
    pub fn snap(&self, value: i64) -> i64 {
        let min = self.min as i64;
        let max = self.max as i64;
        let value = value.max(min).min(max);
        if self.step == 0 {
            return value;
        }
        let step = self.step as i64;
        let steps = ((value - min) as f64 / step as f64).round() as i64;
        (min + steps * step).min(max)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.min == 0 {
            return Err(AppError::InvalidConfig("slider min must be positive".into()));
        }
        if self.min > self.max {
            return Err(AppError::InvalidConfig(format!(
                "slider min {} exceeds max {}",
                self.min, self.max
            )));
        }
        if self.default < self.min || self.default > self.max {
            return Err(AppError::InvalidConfig(format!(
                "slider default {} outside [{}, {}]",
                self.default, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Where price data comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL serving `/stocks` and `/history/{ticker}`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SourceConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| AppError::InvalidConfig(format!("base_url '{}': {}", self.base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(AppError::InvalidConfig(format!(
                "base_url '{}' cannot be used as a base",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be positive".into()));
        }
        Ok(())
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub slider: WindowSlider,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.source.validate()?;
        self.slider.validate()
    }
}
