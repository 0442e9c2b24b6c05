//! Error types for trellis operations.
//!
//! Invalid edits (self-loops, ineligible endpoints, cycles) are **not**
//! errors; they are reported as [`crate::validate::Verdict`] values. This
//! enum covers infrastructure failures only.

use std::io;
use thiserror::Error;

/// The error type for trellis operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Snapshot document could not be parsed.
    #[error("Snapshot format error: {0}")]
    SnapshotFormat(#[from] serde_json::Error),
}

/// A specialized Result type for trellis operations.
pub type Result<T> = std::result::Result<T, Error>;
