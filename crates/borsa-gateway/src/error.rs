//! Error types for gateway operations

use thiserror::Error;

/// Gateway specific errors
///
/// Variants split into two classes: request validation problems
/// ([`is_client_error`](Self::is_client_error)) and everything that went wrong
/// upstream. A missing symbol is an upstream failure like any other.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Required parameter absent or blank; the message is user facing
    #[error("{0}")]
    MissingParameter(String),

    /// Parameter present but not understood
    #[error("Invalid {name}: {value}")]
    InvalidParameter {
        name: String,
        value: String,
    },

    /// Request body could not be decoded
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// No data available for the requested symbol
    #[error("No data found for {0}")]
    NotFound(String),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Upstream failure with its own message
    #[error("{0}")]
    Upstream(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl GatewayError {
    pub fn missing(message: impl Into<String>) -> Self {
        Self::MissingParameter(message.into())
    }

    pub fn invalid(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Whether the caller is at fault (maps to HTTP 400)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter(_) | Self::InvalidParameter { .. } | Self::InvalidBody(_)
        )
    }

    /// Display text, or `fallback` when the error carries no message
    pub fn message_or(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }
}

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GatewayError::missing("Query parameter is required");
        assert_eq!(err.to_string(), "Query parameter is required");

        let err = GatewayError::invalid("period", "2w");
        assert_eq!(err.to_string(), "Invalid period: 2w");

        let err = GatewayError::NotFound("UNKNOWN".to_string());
        assert_eq!(err.to_string(), "No data found for UNKNOWN");
    }

    #[test]
    fn test_error_classification() {
        assert!(GatewayError::missing("x").is_client_error());
        assert!(GatewayError::InvalidBody("eof".into()).is_client_error());
        assert!(!GatewayError::NotFound("X".into()).is_client_error());
        assert!(!GatewayError::Upstream("boom".into()).is_client_error());
        assert!(!GatewayError::YahooFinanceError("boom".into()).is_client_error());
    }

    #[test]
    fn test_message_fallback() {
        let err = GatewayError::Upstream(String::new());
        assert_eq!(
            err.message_or("Failed to fetch stock"),
            "Failed to fetch stock"
        );

        let err = GatewayError::Upstream("rate limited".into());
        assert_eq!(err.message_or("Failed to fetch stock"), "rate limited");
    }
}
