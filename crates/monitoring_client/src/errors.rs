//! Error types for Cloud Monitoring client operations.
//!
//! This module defines the errors that can occur when talking to the Cloud
//! Monitoring v3 API through this crate.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during Cloud Monitoring client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use monitoring_client::Error;
///
/// match client.delete_metric_descriptor(name).await {
///     Ok(()) => println!("deleted {}", name),
///     Err(Error::NotFound(_)) => eprintln!("already gone"),
///     Err(err) => eprintln!("deleting {}: {}", name, err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API answered with a non-success status that has no more specific variant.
    ///
    /// The message is taken from the error body returned by the API when one
    /// is present.
    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// No access token could be obtained for the request.
    #[error(transparent)]
    Auth(#[from] auth_handler::AuthError),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// The API rejected the credentials (401) or the caller lacks permission (403).
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Error deserializing a response body.
    #[error("Failed to deserialize monitoring response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// A request URL could not be built from the endpoint and resource name.
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The API quota has been exceeded (429).
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The request could not be sent or the response could not be read.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
