//! Error types for planetary hour search.

use chrono::{DateTime, FixedOffset};
use hora_base::BaseError;
use thiserror::Error;

/// Errors from partitioning and current-hour lookup.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Failure from the solar event calculation, passed through unchanged.
    #[error(transparent)]
    Base(#[from] BaseError),
    /// No computed planetary hour contains the instant.
    #[error("no planetary hour contains {instant}")]
    HourNotFound { instant: DateTime<FixedOffset> },
    /// Invalid search or cache configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
