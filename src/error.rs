//! Error types for the key search.

use std::time::Duration;

use thiserror::Error;

/// Errors that end a search without a result.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The OS random source failed. Never retried.
    #[error("key generation failed: {0}")]
    KeyGeneration(#[from] rand::Error),

    /// The best-of window closed before any worker reported a key.
    #[error("no candidate found within {}s", .0.as_secs_f64())]
    NoCandidate(Duration),

    /// Every worker hung up before a candidate arrived.
    #[error("all workers exited before producing a candidate")]
    WorkersExited,

    /// Interrupted before any candidate arrived.
    #[error("search interrupted before any candidate was found")]
    Interrupted,

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;
