//! Error types for the Animal API client.

use thiserror::Error;

use animal_etl_config::constants::RETRY_STATUS_CODES;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Animal API client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Non-success HTTP response.
    #[error("API error ({status}) at {url}: {body}")]
    ApiError { status: u16, url: String, body: String },

    /// HTTP error not classified as timeout or connection failure.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Connection could not be established or was dropped mid-request.
    #[error("Connection error for {url}: {message}")]
    Connection { url: String, message: String },

    /// Retry budget exhausted; wraps the last failure.
    #[error("Maximum retries exceeded ({attempts} attempts): {source}")]
    MaxRetriesExceeded {
        attempts: usize,
        #[source]
        source: Box<ClientError>,
    },

    /// Response body did not decode into the expected model.
    #[error("Invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    /// Submission batch exceeds the endpoint limit.
    #[error("Batch size {size} exceeds maximum of {max}")]
    BatchTooLarge { size: usize, max: usize },

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Check if this error is retryable.
    ///
    /// Timeouts, connection failures and [`Self::is_retryable_status`] responses
    /// are transient. Everything else fails immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } => true,
            Self::ApiError { status, .. } => Self::is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable status codes: 500, 502, 503, 504.
    /// Every other non-success status (including 501 and all 4xx) fails immediately.
    pub fn is_retryable_status(status: u16) -> bool {
        RETRY_STATUS_CODES.contains(&status)
    }

    /// Whether this is a validation failure rather than a transport failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidResponse { .. } | Self::BatchTooLarge { .. } | Self::InvalidUrl(_)
        )
    }

    /// HTTP status of the (last) failed response, if one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            Self::MaxRetriesExceeded { source, .. } => source.status_code(),
            _ => None,
        }
    }

    /// Raw body of the (last) failed response, if one was received.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::ApiError { body, .. } => Some(body),
            Self::MaxRetriesExceeded { source, .. } => source.response_body(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> ClientError {
        ClientError::ApiError {
            status,
            url: "http://localhost/animals/v1/animals".to_string(),
            body: "boom".to_string(),
        }
    }

    #[test]
    fn test_error_is_retryable() {
        let err = ClientError::Timeout {
            url: "http://localhost".to_string(),
        };
        assert!(err.is_retryable());

        let err = ClientError::Connection {
            url: "http://localhost".to_string(),
            message: "refused".to_string(),
        };
        assert!(err.is_retryable());

        assert!(api(503).is_retryable());
        assert!(!api(404).is_retryable());

        let err = ClientError::InvalidResponse {
            url: "http://localhost".to_string(),
            message: "missing field `id`".to_string(),
        };
        assert!(!err.is_retryable());
        assert!(err.is_validation());
    }

    #[test]
    fn test_is_retryable_status_retryable() {
        assert!(ClientError::is_retryable_status(500));
        assert!(ClientError::is_retryable_status(502));
        assert!(ClientError::is_retryable_status(503));
        assert!(ClientError::is_retryable_status(504));
    }

    #[test]
    fn test_is_retryable_status_not_retryable() {
        // Client errors (4xx) - should not retry
        assert!(!ClientError::is_retryable_status(400));
        assert!(!ClientError::is_retryable_status(404));
        assert!(!ClientError::is_retryable_status(422));
        assert!(!ClientError::is_retryable_status(429));

        assert!(!ClientError::is_retryable_status(501));
        assert!(!ClientError::is_retryable_status(200));
    }

    #[test]
    fn test_status_and_body_unwrap_max_retries() {
        let err = ClientError::MaxRetriesExceeded {
            attempts: 3,
            source: Box::new(api(503)),
        };
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.response_body(), Some("boom"));
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("3 attempts"));
    }

    #[test]
    fn test_batch_too_large_display() {
        let err = ClientError::BatchTooLarge { size: 101, max: 100 };
        assert_eq!(err.to_string(), "Batch size 101 exceeds maximum of 100");
        assert!(err.is_validation());
        assert_eq!(err.status_code(), None);
    }
}
