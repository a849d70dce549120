//! Google Cloud access token provider
//!
//! Provides the concrete implementation of `AccessTokenProvider` backed by
//! a service account key file.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;
use tracing::{debug, error, info, instrument};

use crate::{AccessTokenProvider, AuthError, AuthResult, CredentialsConfig, MONITORING_SCOPE};

/// Google Cloud token provider
///
/// Wraps a `gcp_auth` service account loaded from the key file named by
/// `GOOGLE_APPLICATION_CREDENTIALS`. Tokens are cached and refreshed by
/// `gcp_auth`.
///
/// # Examples
///
/// ```rust,no_run
/// use auth_handler::{AccessTokenProvider, CredentialsConfig, GcpTokenProvider};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CredentialsConfig::from_env()?;
/// let provider = GcpTokenProvider::from_config(&config).await?;
///
/// let _token = provider.access_token().await?;
/// # Ok(())
/// # }
/// ```
pub struct GcpTokenProvider {
    inner: Arc<dyn gcp_auth::TokenProvider>,
}

impl GcpTokenProvider {
    /// Create a token provider from the key file at `config.credentials_path`.
    ///
    /// Only service account key files (`"type": "service_account"`) are
    /// supported. User credentials and metadata-server credentials are not.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidCredentials` if the file cannot be read or
    /// is not a service account key.
    #[instrument(skip(config), fields(credentials_path = %config.credentials_path.display()))]
    pub async fn from_config(config: &CredentialsConfig) -> AuthResult<Self> {
        debug!("Loading service account key");

        let account = gcp_auth::CustomServiceAccount::from_file(&config.credentials_path)
            .map_err(|e| {
                error!(error = %e, "Failed to load Google credentials");
                AuthError::InvalidCredentials(format!(
                    "{}: {}",
                    config.credentials_path.display(),
                    e
                ))
            })?;

        info!("Loaded Google credentials");
        Ok(Self {
            inner: Arc::new(account),
        })
    }
}

#[async_trait]
impl AccessTokenProvider for GcpTokenProvider {
    async fn access_token(&self) -> AuthResult<SecretString> {
        let token = self.inner.token(&[MONITORING_SCOPE]).await.map_err(|e| {
            error!(error = %e, "Failed to obtain access token");
            AuthError::TokenRequest(e.to_string())
        })?;

        Ok(SecretString::from(token.as_str().to_string()))
    }
}

impl std::fmt::Debug for GcpTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GcpTokenProvider")
            .field("inner", &"<REDACTED>")
            .finish()
    }
}

#[cfg(test)]
#[path = "gcp_token_provider_tests.rs"]
mod tests;
