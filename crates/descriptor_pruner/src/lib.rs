//! Metric descriptor pruning.
//!
//! This crate lists Cloud Monitoring metric descriptors whose type contains a
//! substring and deletes them, unless running in dry-run mode. It can be used
//! programmatically with any [`MetricDescriptorClient`] or through the
//! `prune-metric-descriptors` binary.

use std::io::Write;

use monitoring_client::{
    filter, models::ListMetricDescriptorsRequest, DescriptorPager, MetricDescriptorClient,
};
use tracing::{debug, error, info, warn};

pub mod cli;
pub mod errors;

pub use errors::PruneError;

/// Environment variable holding the tracing filter for the binary.
pub const LOG_ENV_VAR: &str = "PRUNER_LOG";

/// Settings for a single pruning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneConfig {
    /// Project whose descriptors are listed
    pub project: String,
    /// Text that the metric type must contain
    pub match_substring: String,
    /// When set, descriptors are listed and printed but never deleted
    pub dry_run: bool,
    /// Page size hint for list requests; the server default when `None`
    pub page_size: Option<u32>,
}

impl PruneConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `PruneError::InvalidConfig` if the project or the substring is empty.
    pub fn new(
        project: impl Into<String>,
        match_substring: impl Into<String>,
        dry_run: bool,
    ) -> Result<Self, PruneError> {
        let project = project.into();
        let match_substring = match_substring.into();

        if project.is_empty() {
            return Err(PruneError::InvalidConfig(
                "--project must not be empty".to_string(),
            ));
        }
        if match_substring.is_empty() {
            return Err(PruneError::InvalidConfig(
                "--match-substring must not be empty".to_string(),
            ));
        }

        Ok(Self {
            project,
            match_substring,
            dry_run,
            page_size: None,
        })
    }

    /// Set the page size hint sent with each list request.
    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// The server-side filter expression for this run.
    pub fn filter(&self) -> String {
        filter::metric_type_has_substring(&self.match_substring)
    }

    /// The list request issued at the start of the run.
    pub fn list_request(&self) -> ListMetricDescriptorsRequest {
        ListMetricDescriptorsRequest::for_project(&self.project)
            .with_filter(self.filter())
            .with_page_size(self.page_size)
    }
}

/// What a pruning run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Number of descriptors returned by the listing
    pub listed: usize,
    /// Descriptors deleted, in listing order
    pub deleted: Vec<String>,
    /// Descriptors whose deletion failed, in listing order
    pub failed: Vec<String>,
}

/// Lists matching metric descriptors and deletes them.
///
/// The client is injected so the remote service can be replaced in tests.
pub struct DescriptorPruner<'a, C: MetricDescriptorClient + ?Sized> {
    client: &'a C,
    config: PruneConfig,
}

impl<'a, C: MetricDescriptorClient + ?Sized> DescriptorPruner<'a, C> {
    /// Create a new pruner.
    ///
    /// # Arguments
    ///
    /// * `client` - Monitoring API client used for listing and deletion
    /// * `config` - Project, substring and dry-run settings
    pub fn new(client: &'a C, config: PruneConfig) -> Self {
        Self { client, config }
    }

    /// Walk the filtered listing, printing and deleting each descriptor.
    ///
    /// Each descriptor name is written to `out` before any deletion is
    /// attempted, also in dry-run mode. A failed deletion is written to `err`
    /// as `deleting <name>: <error>` and the loop moves on to the next
    /// descriptor; writing that line is best-effort. A listing failure ends
    /// the run.
    ///
    /// # Errors
    ///
    /// Returns `PruneError::List` if fetching a page fails, carrying the
    /// report up to that point, or `PruneError::Output` if writing to `out`
    /// fails.
    pub async fn run<O: Write, E: Write>(
        &self,
        out: &mut O,
        err: &mut E,
    ) -> Result<PruneReport, PruneError> {
        let request = self.config.list_request();

        info!(
            project = self.config.project,
            filter = request.filter.as_deref().unwrap_or_default(),
            dry_run = self.config.dry_run,
            "Searching for metric descriptors"
        );

        let mut report = PruneReport::default();
        let mut pager = DescriptorPager::new(self.client, request);

        loop {
            let descriptor = match pager.next().await {
                Ok(Some(descriptor)) => descriptor,
                Ok(None) => break,
                Err(e) => {
                    error!(
                        project = self.config.project,
                        pages = pager.pages_fetched(),
                        error = %e,
                        "Failed to list metric descriptors"
                    );
                    return Err(PruneError::List { source: e, report });
                }
            };

            report.listed += 1;
            writeln!(out, "{}", descriptor.name)?;

            if self.config.dry_run {
                debug!(descriptor = descriptor.name, "Dry run, skipping deletion");
                continue;
            }

            match self.client.delete_metric_descriptor(&descriptor.name).await {
                Ok(()) => report.deleted.push(descriptor.name),
                Err(e) => {
                    warn!(
                        descriptor = descriptor.name,
                        error = %e,
                        "Failed to delete metric descriptor"
                    );
                    if let Err(write_error) =
                        writeln!(err, "deleting {}: {}", descriptor.name, e)
                    {
                        warn!(
                            descriptor = descriptor.name,
                            error = %write_error,
                            "Failed to report deletion failure"
                        );
                    }
                    report.failed.push(descriptor.name);
                }
            }
        }

        info!(
            project = self.config.project,
            listed = report.listed,
            deleted = report.deleted.len(),
            failed = report.failed.len(),
            pages = pager.pages_fetched(),
            "Pruning completed"
        );

        Ok(report)
    }
}

/// Initialize logging for the binary.
///
/// Logs go to stderr so stdout carries only descriptor names. Logging is off
/// unless `PRUNER_LOG` holds a filter directive.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("off"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
