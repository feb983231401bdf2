//! CLI commands for bump-version
//!
//! - **bump**: report versions and, given a new one, patch every artifact
//! - **reformat**: pretty-print the update manifest and stop

pub mod bump;
pub mod reformat;

pub use bump::{BumpOptions, run_bump};
pub use reformat::run_reformat;
