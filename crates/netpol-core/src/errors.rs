use netpol_api::convert::ConvertError;
use thiserror::Error;

/// Result type alias using NetpolError
pub type Result<T> = std::result::Result<T, NetpolError>;

/// Canonical error type for netpol facilities
#[derive(Debug, Error)]
pub enum NetpolError {
    // ===== Conversion =====
    /// Schema conversion failed (propagated from netpol-api)
    #[error("conversion failed: {0}")]
    Conversion(#[from] ConvertError),

    // ===== Recording =====
    /// Object could not be serialized while building a merge patch
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input document does not have the expected object shape
    #[error("invalid object: {reason}")]
    InvalidObject { reason: String },

    // ===== Integration/IO =====
    /// Underlying I/O failure (file or stream handling in callers)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
