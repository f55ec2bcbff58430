//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all market data operations
//! - [`RetryClass`]: Classification for logging and retry accounting

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method. The data loader retries every
/// class within its attempt budget; the class only decides how the failure
/// is logged.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider could not be reached.
    ///
    /// Carries the underlying message rather than the source error; provider
    /// client libraries bundle their own HTTP stack, so the source type is
    /// not ours to hold.
    #[error("Connection failed: {provider} - {message}")]
    ConnectionFailed {
        /// The provider that could not be reached
        provider: String,
        /// The underlying connection error message
        message: String,
    },

    /// The provider returned an empty history for the symbol.
    ///
    /// An empty result is a failure by contract: a successfully loaded
    /// history is never empty.
    #[error("Empty history for symbol: {symbol}")]
    EmptyHistory {
        /// The symbol with no data
        symbol: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// - [`RetryClass::Transient`]: connection trouble or rate limiting,
    ///   logged as a warning
    /// - [`RetryClass::Unexpected`]: anything else, logged as an error
    ///
    /// Both classes consume a retry attempt in the loader.
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::RateLimited { .. }
            | Self::Timeout { .. }
            | Self::ConnectionFailed { .. }
            | Self::Network(_) => RetryClass::Transient,
            Self::EmptyHistory { .. } | Self::ProviderError { .. } => RetryClass::Unexpected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_is_transient() {
        let error = MarketDataError::RateLimited {
            provider: "YAHOO".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Transient);
    }

    #[test]
    fn test_timeout_is_transient() {
        let error = MarketDataError::Timeout {
            provider: "YAHOO".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Transient);
    }

    #[test]
    fn test_connection_failed_is_transient() {
        let error = MarketDataError::ConnectionFailed {
            provider: "YAHOO".to_string(),
            message: "dns error".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Transient);
    }

    #[test]
    fn test_empty_history_is_unexpected() {
        let error = MarketDataError::EmptyHistory {
            symbol: "005930.KS".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Unexpected);
    }

    #[test]
    fn test_provider_error_is_unexpected() {
        let error = MarketDataError::ProviderError {
            provider: "YAHOO".to_string(),
            message: "Internal server error".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Unexpected);
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::RateLimited {
            provider: "YAHOO".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: YAHOO");

        let error = MarketDataError::EmptyHistory {
            symbol: "005930.KS".to_string(),
        };
        assert_eq!(format!("{}", error), "Empty history for symbol: 005930.KS");
    }
}
