//! Command-line front ends for imgcheck
//!
//! Two binaries share this library:
//!
//! - `validate-artifacts <expected_dir>` compares override files
//! - `validate-container` runs the container content checklist
//!
//! Reports go to stdout; logs and fatal errors go to stderr.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

pub use error::{CliError, Result};
