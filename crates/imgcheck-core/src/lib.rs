//! Verification layer for immutable OS container images
//!
//! This crate provides the two checkers built on top of `imgcheck-fs`:
//!
//! - **Artifact verification**: compares every override file in a reference
//!   tree against its live counterpart by SHA-256 digest
//! - **Checklist execution**: runs declarative presence checks for packages,
//!   binaries, libraries, directories and service units
//!
//! # Architecture
//!
//! ```text
//!              imgcheck-cli
//!                   |
//!             imgcheck-core
//!          /        |        \
//!   artifacts   checklist   system (SystemQuery)
//!          \        |
//!             imgcheck-fs
//! ```
//!
//! Both checkers write a line-oriented report to any [`std::io::Write`] sink
//! and return a report value whose exit code follows [`report::Status`].

pub mod artifacts;
pub mod checklist;
pub mod error;
pub mod report;
pub mod system;

pub use artifacts::{ArtifactReport, ArtifactVerifier, ComparisonOutcome, FailReason, Tally};
pub use checklist::{
    CheckItem, CheckKind, CheckOutcome, Checklist, ChecklistExecutor, CommandSpec, ContainerReport,
    Section, SectionReport,
};
pub use error::{Error, Result};
pub use report::Status;
pub use system::{HostSystem, QueryError, SystemQuery};
