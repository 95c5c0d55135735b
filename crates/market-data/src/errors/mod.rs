//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching or decoding yield curve data.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The request to the provider did not complete within its deadline.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("Unexpected HTTP status from {provider}: {status}")]
    HttpStatus {
        /// The provider that returned the status
        provider: String,
        /// The HTTP status code
        status: u16,
    },

    /// The document returned by the provider could not be decoded.
    #[error("Failed to parse response from {provider}: {message}")]
    Parse {
        /// The provider that produced the document
        provider: String,
        /// What went wrong
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether the failure came from the transport rather than the payload.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_transport() {
        let error = MarketDataError::Timeout {
            provider: "US_TREASURY".to_string(),
        };
        assert!(error.is_transport());
        assert_eq!(error.to_string(), "Timeout: US_TREASURY");
    }

    #[test]
    fn test_parse_is_not_transport() {
        let error = MarketDataError::Parse {
            provider: "US_TREASURY".to_string(),
            message: "unexpected end of document".to_string(),
        };
        assert!(!error.is_transport());
    }

    #[test]
    fn test_http_status_message() {
        let error = MarketDataError::HttpStatus {
            provider: "US_TREASURY".to_string(),
            status: 503,
        };
        assert_eq!(
            error.to_string(),
            "Unexpected HTTP status from US_TREASURY: 503"
        );
    }
}
