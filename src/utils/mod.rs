//! Shared helpers: MIME detection and path normalization.

pub mod mime;
pub mod path;
