//! Error types for the evolutionary engine.
//!
//! Every variant represents a programming error in an adapter, never a
//! transient condition: the engine propagates these immediately and does
//! not retry or recover.

use thiserror::Error;

/// Errors raised by genome and operator misuse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvoError {
    /// An allele was used with a candidate whose shape does not contain it.
    ///
    /// Allele membership is decided by identity, so this fires even when
    /// the foreign allele happens to share a name with a supported one.
    #[error("allele `{0}` does not belong to this candidate's shape")]
    UnsupportedAllele(String),

    /// A directional mutation toward the upper bound was requested for an
    /// allele that is not flagged positive-only.
    #[error("allele `{0}` is not positive-only")]
    NotPositive(String),
}

/// Result type alias for engine and operator calls.
pub type EvoResult<T> = Result<T, EvoError>;
