//! Error types for matching runs.

use mrec_model::{ConfigError, ModelError};
use thiserror::Error;

/// Errors that abort a matching run.
///
/// Rows without a match are not errors; they are reported as
/// [`mrec_model::MatchResult::NoCandidate`].
#[derive(Debug, Error)]
pub enum MatchError {
    /// The configuration does not fit the supplied tables.
    #[error("configuration invalid: {0}")]
    Config(#[from] ConfigError),

    /// The output table could not be built.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for matching operations.
pub type Result<T> = std::result::Result<T, MatchError>;
