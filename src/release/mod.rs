//! Local release inputs: build manifest, artifact naming, changelog, template
//!
//! - **manifest**: locate version and artifact path in the build output manifest
//! - **artifact**: derive the canonical upload file name
//! - **changelog**: extract the latest changelog entry
//! - **template**: render the announcement message from a template file

pub mod artifact;
pub mod changelog;
pub mod manifest;
pub mod template;
