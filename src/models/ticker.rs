use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque instrument identifier, e.g. `"AAPL"`.
///
/// Tickers carry no ordering of their own: the order in which a caller
/// supplies them is the order used for matrix rows, columns and labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    pub fn new(symbol: impl Into<String>) -> Self {
        Ticker(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Ticker(s.to_string())
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Ticker(s)
    }
}
