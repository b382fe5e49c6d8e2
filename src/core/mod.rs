//! Core building blocks for the courier pipeline
//!
//! - **error**: error types with contextual help messages and per-stage exit codes

pub mod error;
