use serde::Serialize;

/// All application errors, categorized by domain.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ── Fetch ──
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    // ── Window ──
    #[error("Invalid window: {0} minutes (must be a positive integer)")]
    InvalidWindow(i64),

    #[error("Load for generation {generation} superseded by generation {latest}")]
    Superseded { generation: u64, latest: u64 },

    // ── Lookup ──
    #[error("Not found: {0}")]
    NotFound(String),

    // ── Configuration ──
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Serialization / Output ──
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Failed to write output: {0}")]
    Output(String),

    // ── General ──
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for any ticker-list or history retrieval failure.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            AppError::Network(_) | AppError::HttpStatus { .. } | AppError::MalformedPayload(_)
        )
    }
}

/// Serializable error response for callers that want a machine-readable failure.
#[derive(Debug, Serialize, Clone)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let code = match err {
            AppError::Network(_) => "FETCH_NETWORK",
            AppError::HttpStatus { .. } => "FETCH_STATUS",
            AppError::MalformedPayload(_) => "FETCH_PAYLOAD",
            AppError::InvalidWindow(_) => "INVALID_WINDOW",
            AppError::Superseded { .. } => "SUPERSEDED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidConfig(_) => "INVALID_CONFIG",
            AppError::Serialization(_) => "SERIALIZATION",
            AppError::Output(_) => "OUTPUT",
            AppError::Internal(_) => "INTERNAL",
        };
        ErrorResponse {
            code: code.to_string(),
            message: err.to_string(),
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let response = ErrorResponse::from(self);
        response.serialize(serializer)
    }
}

// ── Conversions from external errors ──

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::MalformedPayload(err.to_string())
        } else if let (true, Some(status)) = (err.is_status(), err.status()) {
            AppError::HttpStatus {
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
                status: status.as_u16(),
            }
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Output(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Output(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_classification() {
        assert!(AppError::Network("refused".into()).is_fetch_error());
        assert!(AppError::HttpStatus { url: "http://x/stocks".into(), status: 503 }.is_fetch_error());
        assert!(AppError::MalformedPayload("eof".into()).is_fetch_error());
        assert!(!AppError::InvalidWindow(0).is_fetch_error());
        assert!(!AppError::Superseded { generation: 1, latest: 2 }.is_fetch_error());
    }

    #[test]
    fn test_error_serializes_as_response() {
        let err = AppError::InvalidWindow(-5);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "INVALID_WINDOW");
        assert_eq!(
            json["message"],
            "Invalid window: -5 minutes (must be a positive integer)"
        );
    }

    #[test]
    fn test_status_message() {
        let err = AppError::HttpStatus { url: "http://localhost:3000/history/AAA".into(), status: 404 };
        assert_eq!(ErrorResponse::from(&err).code, "FETCH_STATUS");
        assert!(err.to_string().contains("404"));
    }
}
