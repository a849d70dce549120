//! Crate for interacting with the Cloud Monitoring v3 REST API.
//!
//! This crate provides a client for listing and deleting metric descriptors,
//! authenticated with bearer tokens from an [`auth_handler::AccessTokenProvider`].

use std::sync::Arc;

use async_trait::async_trait;
use auth_handler::AccessTokenProvider;
use reqwest::{Response, StatusCode};
use secrecy::ExposeSecret;
use tracing::{debug, error, info, instrument};
use url::Url;

pub mod errors;
pub use errors::Error;

pub mod filter;
pub mod models;

mod pager;
pub use pager::DescriptorPager;

use models::{ApiErrorBody, ListMetricDescriptorsRequest, MetricDescriptorPage};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Public endpoint of the Cloud Monitoring API.
pub const DEFAULT_ENDPOINT: &str = "https://monitoring.googleapis.com";

/// Operations on metric descriptors.
///
/// The pruner depends on this trait rather than on [`MonitoringClient`] so a
/// test double can stand in for the remote service.
#[async_trait]
pub trait MetricDescriptorClient: Send + Sync {
    /// Fetch a single page of metric descriptors.
    ///
    /// # Errors
    /// Returns an `Error` if the request fails or the response cannot be parsed.
    async fn list_metric_descriptors(
        &self,
        request: &ListMetricDescriptorsRequest,
    ) -> Result<MetricDescriptorPage, Error>;

    /// Delete a metric descriptor by its resource name.
    ///
    /// # Arguments
    ///
    /// * `name` - Resource name, e.g. `projects/demo/metricDescriptors/custom.googleapis.com/foo`
    ///
    /// # Errors
    /// Returns `Error::NotFound` if the descriptor does not exist, or another
    /// `Error` if the request fails.
    async fn delete_metric_descriptor(&self, name: &str) -> Result<(), Error>;
}

/// A client for the Cloud Monitoring API.
pub struct MonitoringClient {
    http: reqwest::Client,
    endpoint: Url,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl MonitoringClient {
    /// Creates a new `MonitoringClient`.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Base URL of the API, normally [`DEFAULT_ENDPOINT`].
    /// * `tokens` - Source of bearer tokens for each request.
    ///
    /// # Errors
    /// Returns `Error::ClientBuild` if the HTTP client cannot be constructed.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::sync::Arc;
    /// use auth_handler::StaticTokenProvider;
    /// use monitoring_client::{MonitoringClient, DEFAULT_ENDPOINT};
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let endpoint = url::Url::parse(DEFAULT_ENDPOINT)?;
    /// let client = MonitoringClient::new(endpoint, Arc::new(StaticTokenProvider::new("token")))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(endpoint: Url, tokens: Arc<dyn AccessTokenProvider>) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                "metric-descriptor-pruner/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to build HTTP client");
                Error::ClientBuild(e.to_string())
            })?;

        info!(endpoint = %endpoint, "Created monitoring client");

        Ok(Self {
            http,
            endpoint,
            tokens,
        })
    }

    /// Builds the URL for a v3 resource path such as `projects/demo/metricDescriptors`.
    fn resource_url(&self, resource: &str) -> Result<Url, Error> {
        let base = self.endpoint.as_str().trim_end_matches('/');
        let raw = format!("{}/v3/{}", base, resource.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| Error::InvalidEndpoint(format!("{}: {}", raw, e)))
    }

    async fn bearer_token(&self) -> Result<String, Error> {
        let token = self.tokens.access_token().await?;
        Ok(token.expose_secret().to_string())
    }
}

#[async_trait]
impl MetricDescriptorClient for MonitoringClient {
    #[instrument(skip(self, request), fields(resource = %request.name, page_token = ?request.page_token))]
    async fn list_metric_descriptors(
        &self,
        request: &ListMetricDescriptorsRequest,
    ) -> Result<MetricDescriptorPage, Error> {
        let url = self.resource_url(&format!("{}/metricDescriptors", request.name))?;
        let token = self.bearer_token().await?;

        debug!(url = %url, "Listing metric descriptors");

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(&request.query_pairs())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, &request.name).await);
        }

        let body = response.bytes().await?;
        let page: MetricDescriptorPage = serde_json::from_slice(&body)?;
        Ok(page)
    }

    #[instrument(skip(self), fields(descriptor = %name))]
    async fn delete_metric_descriptor(&self, name: &str) -> Result<(), Error> {
        let url = self.resource_url(name)?;
        let token = self.bearer_token().await?;

        debug!(url = %url, "Deleting metric descriptor");

        let response = self.http.delete(url).bearer_auth(token).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, name).await);
        }

        info!(descriptor = name, "Deleted metric descriptor");
        Ok(())
    }
}

impl std::fmt::Debug for MonitoringClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitoringClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

/// Converts a non-success response into an `Error`, using the API error
/// message when the body carries one.
async fn error_from_response(response: Response, resource: &str) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let (message, api_status) = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => (parsed.error.message, parsed.error.status),
        Err(_) if body.is_empty() => (
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
            None,
        ),
        Err(_) => (body, None),
    };

    error!(
        resource = resource,
        status = status.as_u16(),
        api_status = ?api_status,
        error_message = %message,
        "Received an error from the monitoring API"
    );

    match status {
        StatusCode::NOT_FOUND => Error::NotFound(resource.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::PermissionDenied(message),
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimitExceeded,
        _ => Error::Api {
            status: status.as_u16(),
            message,
        },
    }
}
