//! netpol core facilities
//!
//! This crate provides the pieces that sit around the schema conversion in
//! `netpol-api`:
//! - Error facility with a canonical error type and `Result` alias
//! - Logging facility (tracing-based, profile-driven initialization)
//! - Change-cause recorder: annotates objects with why they were changed
//!   and produces merge-patch documents for that annotation delta

pub mod errors;
pub mod logging;
pub mod patch;
pub mod recorder;

// Re-export commonly used types
pub use errors::{NetpolError, Result};
pub use recorder::{RecordFlags, Recorder, CHANGE_CAUSE_ANNOTATION};
