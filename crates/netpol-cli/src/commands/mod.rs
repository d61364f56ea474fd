pub mod annotate;
pub mod convert;
