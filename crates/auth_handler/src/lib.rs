//! Authentication handler for the metric descriptor pruner
//!
//! This crate owns everything the pruner needs before it can talk to the
//! Cloud Monitoring API:
//! - locating the credential reference in the process environment
//! - turning those credentials into OAuth access tokens for the monitoring scope
//!
//! ## Architecture
//!
//! Callers depend on the [`AccessTokenProvider`] trait. The production
//! implementation is [`GcpTokenProvider`]; tests and local emulators use
//! [`StaticTokenProvider`].

use std::{env, path::PathBuf};

use async_trait::async_trait;
use secrecy::SecretString;

mod gcp_token_provider;

pub use gcp_token_provider::GcpTokenProvider;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Environment variable holding the path to the Google credentials file.
pub const CREDENTIALS_ENV_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// OAuth scope required to list and delete metric descriptors.
pub const MONITORING_SCOPE: &str = "https://www.googleapis.com/auth/monitoring";

/// Result type for authentication operations
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Errors that can occur while locating credentials or obtaining tokens
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The credential reference is not present in the environment.
    ///
    /// The message text is printed verbatim to the terminal by the CLI.
    #[error("missing required env var {0}")]
    MissingCredentials(&'static str),

    /// The credentials could not be loaded or are not usable.
    #[error("Invalid credentials provided: {0}")]
    InvalidCredentials(String),

    /// The token endpoint refused or failed to issue an access token.
    #[error("Failed to obtain access token: {0}")]
    TokenRequest(String),
}

/// Credential configuration loaded from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsConfig {
    /// Path to the credentials file referenced by `GOOGLE_APPLICATION_CREDENTIALS`
    pub credentials_path: PathBuf,
}

impl CredentialsConfig {
    /// Load the credential reference from the environment.
    ///
    /// An unset or empty `GOOGLE_APPLICATION_CREDENTIALS` is reported as
    /// [`AuthError::MissingCredentials`]. The file itself is not opened here.
    pub fn from_env() -> AuthResult<Self> {
        match env::var_os(CREDENTIALS_ENV_VAR) {
            Some(value) if !value.is_empty() => Ok(Self {
                credentials_path: PathBuf::from(value),
            }),
            _ => Err(AuthError::MissingCredentials(CREDENTIALS_ENV_VAR)),
        }
    }
}

/// Source of bearer tokens for the monitoring API.
///
/// Implementations may cache and refresh tokens internally; callers ask for a
/// token before every request.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get an access token valid for [`MONITORING_SCOPE`]
    ///
    /// # Errors
    /// Returns `AuthError::TokenRequest` if no token could be issued
    async fn access_token(&self) -> AuthResult<SecretString>;
}

/// Token provider that always hands out the same token.
///
/// Useful against local emulators and in tests.
pub struct StaticTokenProvider {
    token: SecretString,
}

impl StaticTokenProvider {
    /// Create a provider that always returns `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> AuthResult<SecretString> {
        Ok(self.token.clone())
    }
}

impl std::fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider")
            .field("token", &"<REDACTED>")
            .finish()
    }
}
