//! Error types for `TierCache`.
//!
//! Every failure the engine can report is surfaced synchronously to the
//! caller. None of them is transient, so the engine never retries.

use thiserror::Error;

/// Result type alias for `TierCache` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in `TierCache` operations.
///
/// Error codes follow the pattern `TIER-XXX` for easy debugging.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid level configuration (TIER-001).
    ///
    /// Raised for a zero capacity or an unrecognized eviction policy tag.
    #[error("[TIER-001] Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Level index out of range (TIER-002).
    #[error("[TIER-002] Cache level {index} does not exist (levels: {len})")]
    OutOfRange {
        /// Requested index, possibly negative when it came from external input.
        index: i64,
        /// Number of levels at the time of the call.
        len: usize,
    },

    /// Configuration loading error (TIER-003).
    #[error("[TIER-003] Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the error code (e.g., "TIER-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "TIER-001",
            Self::OutOfRange { .. } => "TIER-002",
            Self::Config(_) => "TIER-003",
        }
    }

    /// Returns true if this error is recoverable.
    ///
    /// Rejected calls leave the cache untouched, so every error is.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        true
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
