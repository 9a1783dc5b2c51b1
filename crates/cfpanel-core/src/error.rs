use thiserror::Error;

/// Result type alias for panel operations
pub type Result<T> = std::result::Result<T, PanelError>;

/// Errors that can occur when talking to the panel backend
#[derive(Error, Debug)]
pub enum PanelError {
    /// No valid session cookie (the backend answered 401 without a JSON body)
    #[error("not logged in: session missing or expired")]
    Unauthorized,

    /// The backend's rate limiter rejected the request
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying, from `Retry-After`
        retry_after: Option<u64>,
    },

    /// Route or resource not found
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// Backend returned a non-JSON error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Response body or extracted error message
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Share link could not be decoded
    #[error("invalid share link: {0}")]
    InvalidLink(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl PanelError {
    /// Returns true if the error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout(_) | Self::Connection(_)
        )
    }

    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(PanelError::Timeout(30).is_retryable());
        assert!(PanelError::RateLimited { retry_after: None }.is_retryable());
        assert!(!PanelError::Unauthorized.is_retryable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(PanelError::Unauthorized.status_code(), Some(401));
        assert_eq!(
            PanelError::Api { code: 500, message: String::new() }.status_code(),
            Some(500)
        );
        assert_eq!(PanelError::Http("boom".into()).status_code(), None);
    }
}
