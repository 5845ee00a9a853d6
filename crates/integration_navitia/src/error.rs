//! Navitia error types

use domain::DomainError;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during Navitia operations
#[derive(Debug, Error)]
pub enum NavitiaError {
    /// Connection to the API failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The request could not be built or its body could not be read
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The API answered with an error
    #[error("Remote error (HTTP {status}) {id}: {message}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Navitia error identifier, e.g. `unknown_object`
        id: String,
        /// Human-readable message
        message: String,
    },

    /// The API key was rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A lookup returned no result
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse the response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// The response body exceeds the configured maximum
    #[error("Response too large: limit is {limit} bytes")]
    ResponseTooLarge {
        /// The configured maximum in bytes
        limit: u64,
    },

    /// The request parameters are invalid
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The request was cancelled through its cancellation token
    #[error("Request cancelled")]
    Cancelled,

    /// A decoded object violates a domain rule
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl NavitiaError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout { .. } | Self::RateLimitExceeded { .. } => {
                true
            },
            Self::Remote { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Build an error from a non-success response
    ///
    /// Navitia reports errors as `{"error": {"id": …, "message": …}}`; the
    /// authentication layer answers `{"message": …}`. Anything else is kept
    /// as raw text.
    pub(crate) fn from_response(status: u16, body: &[u8]) -> Self {
        let (id, message) = match serde_json::from_slice::<RemoteBody>(body) {
            Ok(RemoteBody {
                error: Some(detail),
                ..
            }) => (detail.id, detail.message),
            Ok(RemoteBody {
                error: None,
                id,
                message: Some(message),
            }) => (id.unwrap_or_default(), message),
            _ => (
                String::new(),
                String::from_utf8_lossy(body).trim().to_string(),
            ),
        };

        if status == 401 || status == 403 {
            return Self::Unauthorized(message);
        }

        Self::Remote {
            status,
            id,
            message,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RemoteBody {
    #[serde(default)]
    error: Option<RemoteDetail>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteDetail {
    #[serde(default)]
    id: String,
    #[serde(default)]
    message: String,
}
