//! Error types for the Dream API client.

use thiserror::Error;

/// Error codes the service uses when a usage quota rejects a request.
const LIMIT_CODES: &[&str] = &["limit_exceeded", "usage_limit_reached", "quota_exceeded"];

/// Dream API error type.
#[derive(Error, Debug)]
pub enum Error {
    /// A required setting (the publishable key) is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Machine-readable error code, when the service sends one.
        code: Option<String>,
        /// Error message from the API.
        message: String,
    },
}

impl Error {
    /// Whether this error means the visitor's usage quota is exhausted.
    ///
    /// Structured signals (HTTP 429, a known error code) win; otherwise the
    /// message text is searched for "limit" for services that only send text.
    pub fn is_limit_reached(&self) -> bool {
        match self {
            Self::Api {
                status,
                code,
                message,
            } => {
                *status == 429
                    || code.as_deref().is_some_and(|c| LIMIT_CODES.contains(&c))
                    || message.to_lowercase().contains("limit")
            }
            _ => false,
        }
    }

    /// Message suitable for a page-level banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Api { .. } | Self::Json(_) => "Something went wrong".to_string(),
            Self::Http(e) if e.is_timeout() => {
                "The request timed out. Please try again.".to_string()
            }
            Self::Http(_) => "Could not reach the server. Please try again.".to_string(),
            Self::Configuration(msg) => msg.clone(),
            Self::InvalidUrl(_) => "Something went wrong".to_string(),
        }
    }
}

/// Result type alias for Dream API operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, code: Option<&str>, message: &str) -> Error {
        Error::Api {
            status,
            code: code.map(str::to_string),
            message: message.to_string(),
        }
    }

    #[test]
    fn limit_detected_from_status() {
        assert!(api(429, None, "Too many").is_limit_reached());
    }

    #[test]
    fn limit_detected_from_code() {
        assert!(api(403, Some("limit_exceeded"), "Forbidden").is_limit_reached());
        assert!(api(403, Some("usage_limit_reached"), "").is_limit_reached());
    }

    #[test]
    fn limit_detected_from_text_fallback() {
        assert!(api(400, None, "Monthly Limit reached for plan free").is_limit_reached());
    }

    #[test]
    fn unrelated_errors_are_not_limits() {
        assert!(!api(500, Some("internal"), "boom").is_limit_reached());
        assert!(!Error::Configuration("missing key".into()).is_limit_reached());
    }

    #[test]
    fn user_message_prefers_api_text() {
        assert_eq!(api(400, None, "Card declined").user_message(), "Card declined");
        assert_eq!(api(500, None, "  ").user_message(), "Something went wrong");
    }
}
