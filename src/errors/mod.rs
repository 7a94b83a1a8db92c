//! Error types for the Encosion client.
//!
//! The taxonomy is closed: every failure surfaced by the client is one of
//! these variants. Only [`EncosionError::Timeout`] (API fault code 103) is
//! retryable; everything else propagates to the caller unchanged.

use std::fmt;
use thiserror::Error;

/// Result type alias for Encosion operations.
pub type EncosionResult<T> = Result<T, EncosionError>;

/// API fault code the service uses to signal a transient timeout.
pub const TIMEOUT_FAULT_CODE: i64 = 103;

/// Error type for Encosion client operations.
#[derive(Debug, Error)]
pub enum EncosionError {
    /// The token for the requested access intent is not configured.
    #[error("Missing token: {message}")]
    MissingToken {
        /// Which token was missing.
        message: String,
    },

    /// No asset could be resolved, either locally (empty id set) or
    /// because the API answered with `null`.
    #[error("Asset not found: {message}")]
    AssetNotFound {
        /// Error message.
        message: String,
    },

    /// The HTTP status line was not 200.
    #[error("HTTP header status code: {status}")]
    Http {
        /// HTTP status code.
        status: u16,
    },

    /// The API signalled a timeout (fault code 103).
    #[error("Brightcove timeout: {message}")]
    Timeout {
        /// Fault code reported by the API.
        code: i64,
        /// Error message from the API.
        message: String,
    },

    /// Low-level API fault (codes 100-299).
    #[error("Brightcove responded with an error: {message} (code {})", DisplayCode(.code))]
    LowLevelApi {
        /// Fault code reported by the API.
        code: Option<i64>,
        /// Error message from the API.
        message: String,
    },

    /// High-level API fault (codes 300-399).
    #[error("Brightcove responded with an error: {message} (code {})", DisplayCode(.code))]
    HighLevelApi {
        /// Fault code reported by the API.
        code: Option<i64>,
        /// Error message from the API.
        message: String,
    },

    /// Any other API fault.
    #[error("Brightcove responded with an error: {message} (code {})", DisplayCode(.code))]
    Api {
        /// Fault code reported by the API, if it sent a usable one.
        code: Option<i64>,
        /// Error message from the API.
        message: String,
    },

    /// The host could not be reached or the connection broke.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// The transport gave up waiting on a single attempt.
    #[error("Transport timeout: {message}")]
    TransportTimeout {
        /// Error message.
        message: String,
    },

    /// The response body was not valid JSON, or a request could not be
    /// encoded.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },

    /// Invalid client configuration.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// A write command that needs a file was issued without one.
    #[error("Missing file: {message}")]
    MissingFile {
        /// Error message.
        message: String,
    },
}

/// Stable discriminant of an [`EncosionError`], used for logging and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`EncosionError::MissingToken`].
    MissingToken,
    /// See [`EncosionError::AssetNotFound`].
    AssetNotFound,
    /// See [`EncosionError::Http`].
    Http,
    /// See [`EncosionError::Timeout`].
    Timeout,
    /// See [`EncosionError::LowLevelApi`].
    LowLevelApi,
    /// See [`EncosionError::HighLevelApi`].
    HighLevelApi,
    /// See [`EncosionError::Api`].
    Api,
    /// See [`EncosionError::Connection`].
    Connection,
    /// See [`EncosionError::TransportTimeout`].
    TransportTimeout,
    /// See [`EncosionError::Serialization`].
    Serialization,
    /// See [`EncosionError::Configuration`].
    Configuration,
    /// See [`EncosionError::MissingFile`].
    MissingFile,
}

impl ErrorKind {
    /// Returns the snake_case name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MissingToken => "missing_token",
            ErrorKind::AssetNotFound => "asset_not_found",
            ErrorKind::Http => "http",
            ErrorKind::Timeout => "timeout",
            ErrorKind::LowLevelApi => "low_level_api",
            ErrorKind::HighLevelApi => "high_level_api",
            ErrorKind::Api => "api",
            ErrorKind::Connection => "connection",
            ErrorKind::TransportTimeout => "transport_timeout",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Configuration => "configuration",
            ErrorKind::MissingFile => "missing_file",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct DisplayCode<'a>(&'a Option<i64>);

impl fmt::Display for DisplayCode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "{}", code),
            None => f.write_str("unknown"),
        }
    }
}

impl EncosionError {
    /// Returns true if the retry controller may re-issue the call.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EncosionError::Timeout { .. })
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncosionError::MissingToken { .. } => ErrorKind::MissingToken,
            EncosionError::AssetNotFound { .. } => ErrorKind::AssetNotFound,
            EncosionError::Http { .. } => ErrorKind::Http,
            EncosionError::Timeout { .. } => ErrorKind::Timeout,
            EncosionError::LowLevelApi { .. } => ErrorKind::LowLevelApi,
            EncosionError::HighLevelApi { .. } => ErrorKind::HighLevelApi,
            EncosionError::Api { .. } => ErrorKind::Api,
            EncosionError::Connection { .. } => ErrorKind::Connection,
            EncosionError::TransportTimeout { .. } => ErrorKind::TransportTimeout,
            EncosionError::Serialization { .. } => ErrorKind::Serialization,
            EncosionError::Configuration { .. } => ErrorKind::Configuration,
            EncosionError::MissingFile { .. } => ErrorKind::MissingFile,
        }
    }

    /// Returns the API fault code, for errors raised from a fault body.
    pub fn fault_code(&self) -> Option<i64> {
        match self {
            EncosionError::Timeout { code, .. } => Some(*code),
            EncosionError::LowLevelApi { code, .. }
            | EncosionError::HighLevelApi { code, .. }
            | EncosionError::Api { code, .. } => *code,
            _ => None,
        }
    }

    /// Maps an API fault code and message onto the taxonomy.
    ///
    /// 103 is a retryable timeout, 100-299 low-level, 300-399 high-level,
    /// anything else (including a missing code) is a generic API fault.
    pub fn from_fault(code: Option<i64>, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            Some(TIMEOUT_FAULT_CODE) => EncosionError::Timeout {
                code: TIMEOUT_FAULT_CODE,
                message,
            },
            Some(100..=299) => EncosionError::LowLevelApi { code, message },
            Some(300..=399) => EncosionError::HighLevelApi { code, message },
            _ => EncosionError::Api { code, message },
        }
    }

    /// Creates a missing token error for the given token name.
    pub fn missing_token(token: &str) -> Self {
        EncosionError::MissingToken {
            message: format!("No {} token found", token),
        }
    }

    /// Creates an asset-not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        EncosionError::AssetNotFound {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for EncosionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EncosionError::TransportTimeout {
                message: err.to_string(),
            }
        } else if err.is_builder() {
            EncosionError::Configuration {
                message: err.to_string(),
            }
        } else {
            EncosionError::Connection {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for EncosionError {
    fn from(err: serde_json::Error) -> Self {
        EncosionError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for EncosionError {
    fn from(err: url::ParseError) -> Self {
        EncosionError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some(103), ErrorKind::Timeout ; "timeout code")]
    #[test_case(Some(100), ErrorKind::LowLevelApi ; "low bucket start")]
    #[test_case(Some(199), ErrorKind::LowLevelApi ; "low bucket end")]
    #[test_case(Some(200), ErrorKind::LowLevelApi ; "second low bucket start")]
    #[test_case(Some(299), ErrorKind::LowLevelApi ; "second low bucket end")]
    #[test_case(Some(300), ErrorKind::HighLevelApi ; "high bucket start")]
    #[test_case(Some(399), ErrorKind::HighLevelApi ; "high bucket end")]
    #[test_case(Some(99), ErrorKind::Api ; "below buckets")]
    #[test_case(Some(400), ErrorKind::Api ; "above buckets")]
    #[test_case(None, ErrorKind::Api ; "no code")]
    fn test_from_fault_buckets(code: Option<i64>, expected: ErrorKind) {
        assert_eq!(EncosionError::from_fault(code, "boom").kind(), expected);
    }

    #[test]
    fn test_only_timeout_is_retryable() {
        assert!(EncosionError::from_fault(Some(103), "slow").is_retryable());
        assert!(!EncosionError::from_fault(Some(104), "bad").is_retryable());
        assert!(!EncosionError::Http { status: 503 }.is_retryable());
        assert!(!EncosionError::TransportTimeout {
            message: "read timed out".to_string()
        }
        .is_retryable());
        assert!(!EncosionError::missing_token("read").is_retryable());
    }

    #[test]
    fn test_fault_message_preserved() {
        let error = EncosionError::from_fault(Some(302), "illegal value");
        assert_eq!(error.fault_code(), Some(302));
        assert_eq!(
            error.to_string(),
            "Brightcove responded with an error: illegal value (code 302)"
        );

        let error = EncosionError::from_fault(None, "mystery");
        assert_eq!(
            error.to_string(),
            "Brightcove responded with an error: mystery (code unknown)"
        );
    }

    #[test]
    fn test_missing_token_message() {
        let error = EncosionError::missing_token("write");
        assert_eq!(error.to_string(), "Missing token: No write token found");
        assert_eq!(error.kind(), ErrorKind::MissingToken);
    }

    #[test]
    fn test_http_error_display() {
        let error = EncosionError::Http { status: 404 };
        assert_eq!(error.to_string(), "HTTP header status code: 404");
        assert_eq!(error.kind().as_str(), "http");
    }
}
