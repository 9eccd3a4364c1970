//! Error types for the media upload client.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type for media upload operations.
pub type MediaUploadResult<T> = Result<T, MediaUploadError>;

/// Top-level error type for a media upload.
///
/// Each variant names the stage of the upload that failed.
#[derive(Debug, Error)]
pub enum MediaUploadError {
    /// Building the multipart body failed.
    #[error("encoding multipart payload: {0}")]
    Encoding(#[from] EncodingError),

    /// Building the outgoing request failed.
    #[error("creating request object: {0}")]
    RequestConstruction(String),

    /// The transport failed to deliver the request.
    #[error("sending upload request: {0}")]
    Transport(#[from] TransportError),

    /// The remote service answered with a status of 400 or above.
    #[error("upload request returned an error: {} {}\n{}", .status.as_u16(), .status_text, .body)]
    Api {
        /// Response status code.
        status: StatusCode,
        /// Canonical reason phrase for the status.
        status_text: String,
        /// Raw response body.
        body: String,
    },

    /// The success response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl MediaUploadError {
    /// Creates a request construction error.
    pub fn request_construction(msg: impl Into<String>) -> Self {
        MediaUploadError::RequestConstruction(msg.into())
    }

    /// Returns the HTTP status code for API errors.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            MediaUploadError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the upload was aborted through its cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, MediaUploadError::Transport(TransportError::Cancelled))
    }

    /// Returns true if repeating the same upload might succeed.
    ///
    /// The client never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            MediaUploadError::Transport(
                TransportError::Timeout(_) | TransportError::Network(_),
            ) => true,
            MediaUploadError::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            _ => false,
        }
    }
}

/// Multipart encoding errors.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// Writing into the body buffer failed.
    #[error("writing multipart body: {0}")]
    Io(#[from] std::io::Error),

    /// The boundary violates RFC 2046.
    #[error("invalid boundary: {0}")]
    InvalidBoundary(String),

    /// A part header value cannot be represented.
    #[error("invalid part header value: {0}")]
    InvalidHeaderValue(String),
}

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network error.
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout error.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// HTTP error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The request was cancelled by the caller.
    #[error("request cancelled")]
    Cancelled,

    /// The transport could not authenticate the request.
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Network(err.to_string())
        } else {
            TransportError::Http(err.to_string())
        }
    }
}

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// No token was configured.
    #[error("missing bearer token: {0}")]
    MissingToken(String),

    /// The token cannot be used as a header value.
    #[error("invalid token: {0}")]
    InvalidToken(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Unknown media category.
    #[error("Invalid media category: {0}")]
    InvalidMediaCategory(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_contains_status_and_body() {
        let error = MediaUploadError::Api {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            status_text: "Payload Too Large".to_string(),
            body: "{\"errors\":[{\"code\":324}]}".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("413"));
        assert!(message.contains("Payload Too Large"));
        assert!(message.contains("{\"errors\":[{\"code\":324}]}"));
        assert_eq!(error.status_code(), Some(StatusCode::PAYLOAD_TOO_LARGE));
    }

    #[test]
    fn test_is_retryable() {
        let error = MediaUploadError::Transport(TransportError::Timeout("slow".to_string()));
        assert!(error.is_retryable());

        let error = MediaUploadError::Api {
            status: StatusCode::SERVICE_UNAVAILABLE,
            status_text: String::new(),
            body: String::new(),
        };
        assert!(error.is_retryable());

        let error = MediaUploadError::Api {
            status: StatusCode::UNAUTHORIZED,
            status_text: String::new(),
            body: String::new(),
        };
        assert!(!error.is_retryable());

        let error = MediaUploadError::Transport(TransportError::Cancelled);
        assert!(!error.is_retryable());
        assert!(error.is_cancelled());
    }

    #[test]
    fn test_stage_prefixes() {
        let error = MediaUploadError::from(EncodingError::InvalidBoundary("x".to_string()));
        assert!(error.to_string().starts_with("encoding multipart payload"));

        let error = MediaUploadError::from(TransportError::Network("reset".to_string()));
        assert!(error.to_string().starts_with("sending upload request"));

        let error = MediaUploadError::request_construction("bad url");
        assert!(error.to_string().starts_with("creating request object"));
    }
}
