//! Command-line surface of the `prune-metric-descriptors` binary.

use std::{io::Write, sync::Arc};

use auth_handler::{AccessTokenProvider, CredentialsConfig, GcpTokenProvider};
use clap::{builder::NonEmptyStringValueParser, Parser};
use monitoring_client::{MonitoringClient, DEFAULT_ENDPOINT};
use tracing::instrument;
use url::Url;

use crate::{DescriptorPruner, PruneConfig, PruneError, PruneReport};

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

/// Delete metric descriptors.
#[derive(Parser, Debug, Clone)]
#[command(name = "prune-metric-descriptors", version)]
#[command(about = "Delete metric descriptors.")]
#[command(long_about = "Delete unused metric descriptors from Cloud Monitoring.")]
pub struct Args {
    /// GCP project ID
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub project: String,

    /// Match substring in metric descriptor type
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub match_substring: String,

    /// Toggle dry run on and off
    #[arg(long)]
    pub dry_run: bool,

    /// Cloud Monitoring API endpoint
    #[arg(long, env = "MONITORING_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: Url,

    /// Maximum number of descriptors per list request
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,
}

impl Args {
    /// Build the run configuration from the parsed flags.
    pub fn prune_config(&self) -> Result<PruneConfig, PruneError> {
        Ok(PruneConfig::new(&self.project, &self.match_substring, self.dry_run)?
            .with_page_size(self.page_size))
    }
}

/// Run the binary: check credentials, build the client, prune.
///
/// Nothing is sent to the API unless `GOOGLE_APPLICATION_CREDENTIALS` is set.
/// Tokens come from the service account key file it names.
#[instrument(skip(args, out, err), fields(project = %args.project, dry_run = args.dry_run))]
pub async fn execute<O: Write, E: Write>(
    args: &Args,
    out: &mut O,
    err: &mut E,
) -> Result<PruneReport, PruneError> {
    args.prune_config()?;

    let credentials = CredentialsConfig::from_env()?;
    let tokens = GcpTokenProvider::from_config(&credentials).await?;

    execute_with_tokens(args, Arc::new(tokens), out, err).await
}

/// Build the client around `tokens` and prune.
///
/// The client lives for the duration of this call and is dropped on every
/// return path.
pub async fn execute_with_tokens<O: Write, E: Write>(
    args: &Args,
    tokens: Arc<dyn AccessTokenProvider>,
    out: &mut O,
    err: &mut E,
) -> Result<PruneReport, PruneError> {
    let config = args.prune_config()?;

    let client =
        MonitoringClient::new(args.endpoint.clone(), tokens).map_err(PruneError::Client)?;

    DescriptorPruner::new(&client, config).run(out, err).await
}
