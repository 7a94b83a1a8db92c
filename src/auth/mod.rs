//! Credential handling for the Encosion client.
//!
//! The media API authenticates every call with a token carried in the
//! request parameters: one token for the read service and another for the
//! write service.

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{EncosionError, EncosionResult};

/// Which credential an operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessIntent {
    /// Read service (HTTP GET).
    Read,
    /// Write service (HTTP POST).
    Write,
}

impl AccessIntent {
    /// Returns the lowercase name of the intent.
    pub fn as_str(self) -> &'static str {
        match self {
            AccessIntent::Read => "read",
            AccessIntent::Write => "write",
        }
    }
}

/// The read and write tokens active for a client.
#[derive(Clone, Default)]
pub struct Credentials {
    read_token: Option<SecretString>,
    write_token: Option<SecretString>,
}

impl Credentials {
    /// Creates an empty credential set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the read token. An empty string clears it.
    pub fn with_read_token(mut self, token: impl Into<String>) -> Self {
        self.read_token = non_empty(token.into());
        self
    }

    /// Sets the write token. An empty string clears it.
    pub fn with_write_token(mut self, token: impl Into<String>) -> Self {
        self.write_token = non_empty(token.into());
        self
    }

    /// Returns true if a token for the given intent is configured.
    pub fn has_token(&self, intent: AccessIntent) -> bool {
        self.slot(intent).is_some()
    }

    /// Returns the token for the given intent.
    ///
    /// Fails with [`EncosionError::MissingToken`] when the token is not
    /// configured. This is a local check and never touches the network.
    pub fn token_for(&self, intent: AccessIntent) -> EncosionResult<&str> {
        self.slot(intent)
            .map(|token| token.expose_secret().as_str())
            .ok_or_else(|| EncosionError::missing_token(intent.as_str()))
    }

    fn slot(&self, intent: AccessIntent) -> Option<&SecretString> {
        match intent {
            AccessIntent::Read => self.read_token.as_ref(),
            AccessIntent::Write => self.write_token.as_ref(),
        }
    }
}

fn non_empty(token: String) -> Option<SecretString> {
    if token.trim().is_empty() {
        None
    } else {
        Some(SecretString::new(token))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |token: &Option<SecretString>| token.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("Credentials")
            .field("read_token", &redact(&self.read_token))
            .field("write_token", &redact(&self.write_token))
            .finish()
    }
}
