//! Network policy API types and version conversion
//!
//! This crate provides the two schema versions of the network policy
//! data model and the conversion functions between them:
//!
//! - **v1**: the wire/API-facing schema, which still carries the deprecated
//!   singular `ipBlock` field alongside the newer `ipBlocks` list
//! - **internal**: the canonical schema used by the rest of the system,
//!   which keeps only the list
//! - **convert**: the reconciliation logic that collapses the two redundant
//!   v1 fields into the canonical list, and regenerates the deprecated
//!   field on the way back out

pub mod convert;
pub mod internal;
pub mod metadata;
pub mod v1;

// Re-export commonly used types
pub use convert::{ConvertError, Scope};
pub use metadata::{Annotated, LabelSelector, ObjectMeta};
