//! Command implementations for imgcheck-cli

pub mod artifacts;
pub mod container;

pub use artifacts::{run_artifacts, run_artifacts_to};
pub use container::{run_container, run_container_to};
