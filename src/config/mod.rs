//! Configuration module for the Encosion client.
//!
//! Holds the endpoint settings for the read and write services, the
//! per-protocol timeouts, the retry bound and the credential set.

use std::time::Duration;

use crate::auth::Credentials;
use crate::errors::{EncosionError, EncosionResult};

/// Default API host.
pub const DEFAULT_SERVER: &str = "api.brightcove.com";

/// Default port.
pub const DEFAULT_PORT: u16 = 80;

/// Path of the read service.
pub const DEFAULT_READ_PATH: &str = "/services/library";

/// Path of the write service.
pub const DEFAULT_WRITE_PATH: &str = "/services/post";

/// Default receive timeout for read calls.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Default send timeout for write calls (uploads can be large).
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(600);

/// Default retry bound for read calls.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Fixed retry bound for write calls, independent of `max_retries`.
pub const WRITE_MAX_RETRIES: u32 = 5;

const HTTP_DEFAULT_PORT: u16 = 80;

/// Configuration for the Encosion client.
#[derive(Clone)]
pub struct EncosionConfig {
    /// API host name.
    pub server: String,
    /// API port.
    pub port: u16,
    /// Use https instead of http.
    pub secure: bool,
    /// Path of the read service.
    pub read_path: String,
    /// Path of the write service.
    pub write_path: String,
    /// Receive timeout applied to each read attempt.
    pub read_timeout: Duration,
    /// Send timeout applied to each write attempt.
    pub write_timeout: Duration,
    /// Maximum additional attempts for a read call that hit an API timeout.
    pub max_retries: u32,
    pub(crate) credentials: Credentials,
}

impl EncosionConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> EncosionConfigBuilder {
        EncosionConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ENCOSION_READ_TOKEN` / `ENCOSION_WRITE_TOKEN`: API tokens
    /// - `ENCOSION_SERVER`, `ENCOSION_PORT`, `ENCOSION_SECURE`: endpoint
    /// - `ENCOSION_READ_TIMEOUT`, `ENCOSION_WRITE_TIMEOUT`: timeouts in seconds
    /// - `ENCOSION_MAX_RETRIES`: read retry bound
    ///
    /// Unparseable numeric values are ignored and the default is kept.
    pub fn from_env() -> EncosionResult<Self> {
        let mut builder = EncosionConfigBuilder::new();

        if let Ok(token) = std::env::var("ENCOSION_READ_TOKEN") {
            builder = builder.read_token(token);
        }
        if let Ok(token) = std::env::var("ENCOSION_WRITE_TOKEN") {
            builder = builder.write_token(token);
        }
        if let Ok(server) = std::env::var("ENCOSION_SERVER") {
            builder = builder.server(server);
        }
        if let Some(port) = env_parse::<u16>("ENCOSION_PORT") {
            builder = builder.port(port);
        }
        if let Ok(secure) = std::env::var("ENCOSION_SECURE") {
            builder = builder.secure(matches!(secure.to_lowercase().as_str(), "1" | "true" | "yes"));
        }
        if let Some(secs) = env_parse::<u64>("ENCOSION_READ_TIMEOUT") {
            builder = builder.read_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = env_parse::<u64>("ENCOSION_WRITE_TIMEOUT") {
            builder = builder.write_timeout(Duration::from_secs(secs));
        }
        if let Some(retries) = env_parse::<u32>("ENCOSION_MAX_RETRIES") {
            builder = builder.max_retries(retries);
        }

        builder.build()
    }

    /// Returns the credential set.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the URL of the read service.
    pub fn read_url(&self) -> String {
        self.endpoint_url(&self.read_path)
    }

    /// Returns the URL of the write service.
    pub fn write_url(&self) -> String {
        self.endpoint_url(&self.write_path)
    }

    /// Builds a service URL. The port is left out when it is 80.
    pub fn endpoint_url(&self, path: &str) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        if self.port == HTTP_DEFAULT_PORT {
            format!("{}://{}{}", scheme, self.server, path)
        } else {
            format!("{}://{}:{}{}", scheme, self.server, self.port, path)
        }
    }
}

impl std::fmt::Debug for EncosionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncosionConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("read_path", &self.read_path)
            .field("write_path", &self.write_path)
            .field("read_timeout", &self.read_timeout)
            .field("write_timeout", &self.write_timeout)
            .field("max_retries", &self.max_retries)
            .field("credentials", &self.credentials)
            .finish()
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|value| value.trim().parse().ok())
}

/// Builder for `EncosionConfig`.
#[derive(Default)]
pub struct EncosionConfigBuilder {
    server: Option<String>,
    port: Option<u16>,
    secure: bool,
    read_path: Option<String>,
    write_path: Option<String>,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
    max_retries: Option<u32>,
    credentials: Credentials,
}

impl EncosionConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API host.
    pub fn server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Sets the API port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Enables or disables https.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Sets the read service path.
    pub fn read_path(mut self, path: impl Into<String>) -> Self {
        self.read_path = Some(path.into());
        self
    }

    /// Sets the write service path.
    pub fn write_path(mut self, path: impl Into<String>) -> Self {
        self.write_path = Some(path.into());
        self
    }

    /// Sets the read timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Sets the write timeout.
    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }

    /// Sets the read retry bound.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Sets the read token.
    pub fn read_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = self.credentials.with_read_token(token);
        self
    }

    /// Sets the write token.
    pub fn write_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = self.credentials.with_write_token(token);
        self
    }

    /// Replaces the whole credential set.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Builds the configuration.
    ///
    /// Tokens are not required here: a missing token only fails the calls
    /// that need it.
    pub fn build(self) -> EncosionResult<EncosionConfig> {
        let server = self
            .server
            .unwrap_or_else(|| DEFAULT_SERVER.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();

        if server.is_empty() {
            return Err(EncosionError::Configuration {
                message: "Server cannot be empty".to_string(),
            });
        }

        if server.contains("://") {
            return Err(EncosionError::Configuration {
                message: "Server must be a host name; use `secure` to pick the scheme".to_string(),
            });
        }

        let read_path = self.read_path.unwrap_or_else(|| DEFAULT_READ_PATH.to_string());
        let write_path = self.write_path.unwrap_or_else(|| DEFAULT_WRITE_PATH.to_string());

        for path in [&read_path, &write_path] {
            if !path.starts_with('/') {
                return Err(EncosionError::Configuration {
                    message: format!("Service path must start with '/': {}", path),
                });
            }
        }

        let read_timeout = self.read_timeout.unwrap_or(DEFAULT_READ_TIMEOUT);
        let write_timeout = self.write_timeout.unwrap_or(DEFAULT_WRITE_TIMEOUT);

        if read_timeout.is_zero() || write_timeout.is_zero() {
            return Err(EncosionError::Configuration {
                message: "Timeouts must be greater than zero".to_string(),
            });
        }

        Ok(EncosionConfig {
            server,
            port: self.port.unwrap_or(DEFAULT_PORT),
            secure: self.secure,
            read_path,
            write_path,
            read_timeout,
            write_timeout,
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            credentials: self.credentials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AccessIntent;

    #[test]
    fn test_config_builder_defaults() {
        let config = EncosionConfig::builder().build().unwrap();

        assert_eq!(config.server, DEFAULT_SERVER);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(!config.secure);
        assert_eq!(config.read_path, DEFAULT_READ_PATH);
        assert_eq!(config.write_path, DEFAULT_WRITE_PATH);
        assert_eq!(config.read_timeout, DEFAULT_READ_TIMEOUT);
        assert_eq!(config.write_timeout, DEFAULT_WRITE_TIMEOUT);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
        assert!(!config.credentials().has_token(AccessIntent::Read));
    }

    #[test]
    fn test_config_builder_success() {
        let config = EncosionConfig::builder()
            .server("media.example.com")
            .port(8080)
            .secure(true)
            .read_timeout(Duration::from_secs(5))
            .max_retries(7)
            .read_token("read-token")
            .build()
            .unwrap();

        assert_eq!(config.server, "media.example.com");
        assert_eq!(config.port, 8080);
        assert_eq!(config.read_timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 7);
        assert_eq!(
            config.credentials().token_for(AccessIntent::Read).unwrap(),
            "read-token"
        );
    }

    #[test]
    fn test_endpoint_url_omits_default_port() {
        let config = EncosionConfig::builder().build().unwrap();
        assert_eq!(config.read_url(), "http://api.brightcove.com/services/library");
        assert_eq!(config.write_url(), "http://api.brightcove.com/services/post");
    }

    #[test]
    fn test_endpoint_url_keeps_custom_port() {
        let config = EncosionConfig::builder()
            .server("localhost")
            .port(3000)
            .secure(true)
            .build()
            .unwrap();

        assert_eq!(config.read_url(), "https://localhost:3000/services/library");
    }

    #[test]
    fn test_config_rejects_empty_server() {
        let result = EncosionConfig::builder().server("  ").build();
        assert!(matches!(result, Err(EncosionError::Configuration { .. })));
    }

    #[test]
    fn test_config_rejects_url_as_server() {
        let result = EncosionConfig::builder().server("https://api.example.com").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_rejects_relative_path() {
        let result = EncosionConfig::builder().read_path("services/library").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_rejects_zero_timeout() {
        let result = EncosionConfig::builder().write_timeout(Duration::ZERO).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_debug_redacts_tokens() {
        let config = EncosionConfig::builder()
            .read_token("secret-read")
            .write_token("secret-write")
            .build()
            .unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("secret-read"));
        assert!(!debug_str.contains("secret-write"));
    }
}
