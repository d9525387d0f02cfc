//! # API Error Types
//!
//! ```text
//! reqwest::Error / HTTP status
//!      │
//!      ▼
//! ApiError (this module)
//!      │
//!      ▼
//! InventoryError (rocketshoes-core) → CartError::Inventory
//! ```

use thiserror::Error;

/// Errors from talking to the catalog/stock services (or serving them).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered 404 for this resource.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The service answered with another non-success status.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// The request never got an answer (refused, DNS, timeout).
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The body was not the JSON we expected.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The configured base URL cannot address the service routes.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The fixture file could not be read or parsed.
    #[error("Fixture error: {0}")]
    Fixture(String),

    /// The fixture server could not bind or crashed.
    #[error("Server error: {0}")]
    Server(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Http {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            ApiError::Connection(err.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_parse_error_maps_to_invalid_url() {
        let err: ApiError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }
}
