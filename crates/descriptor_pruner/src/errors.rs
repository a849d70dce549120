use std::io;

use thiserror::Error;

use crate::PruneReport;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Exit status for command-line usage errors.
pub const EXIT_USAGE: u8 = 2;

/// Exit status for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Errors that end a pruning run.
///
/// Failures deleting individual descriptors are not errors at this level;
/// they are reported as they happen and collected in the [`PruneReport`].
#[derive(Error, Debug)]
pub enum PruneError {
    /// The run configuration is unusable, e.g. an empty project.
    #[error("Invalid arguments: {0}")]
    InvalidConfig(String),

    /// The credential reference is missing or the credentials are unusable.
    ///
    /// Displayed without a prefix so the fixed credential message reaches the
    /// terminal unchanged.
    #[error(transparent)]
    Credentials(#[from] auth_handler::AuthError),

    /// The monitoring client could not be constructed.
    #[error("creating metric client: {0}")]
    Client(#[source] monitoring_client::Error),

    /// Fetching a page of descriptors failed. The loop stopped at that point.
    ///
    /// `report` holds what was done before the failure.
    #[error("listing metric descriptors: {source}")]
    List {
        #[source]
        source: monitoring_client::Error,
        report: PruneReport,
    },

    /// Writing to the output streams failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl PruneError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            PruneError::InvalidConfig(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}
