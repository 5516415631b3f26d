//! Errors raised while validating collaborator input.
//!
//! Trimming and visibility filtering are total and never fail; only the
//! constructors and loaders that sit at the input boundary return these.

use thiserror::Error;

use crate::Timestamp;

#[derive(Debug, Error)]
pub enum Error {
    #[error("blockage window ends before it starts ({start} > {end})")]
    InvalidWindow { start: Timestamp, end: Timestamp },

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
