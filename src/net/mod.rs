//! Outbound HTTP integrations
//!
//! - **dropbox**: artifact storage (delete, upload, public share link)
//! - **telegram**: release announcement delivery

pub mod dropbox;
pub mod telegram;
