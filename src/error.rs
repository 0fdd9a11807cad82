use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the core test machinery.
#[derive(Debug, Error)]
pub enum TestError {
    /// Rejected at construction: out-of-range pain level, non-positive
    /// trial count, unknown category, or a required asset bucket that
    /// ended up empty.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// API misuse, e.g. recording a guess when no trial is open. Not
    /// expected during normal operation.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// An asset file could not be read or decoded as an image. Callers
    /// log this and skip the file rather than aborting.
    #[error("failed to load asset {path}: {reason}")]
    AssetLoad { path: PathBuf, reason: String },
}
