//! Core building blocks for bump-version
//!
//! - **config**: optional bump.toml and resolution of artifact paths
//! - **error**: error types with contextual help messages and exit codes
//! - **text**: line-ending aware text files and pending edits
//! - **vcs**: system git, for staging the result

pub mod config;
pub mod error;
pub mod text;
pub mod vcs;
