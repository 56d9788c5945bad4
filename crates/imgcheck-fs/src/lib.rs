//! Filesystem primitives for imgcheck
//!
//! Provides the read-only building blocks used by the verifiers: deterministic
//! tree collection, path exclusion rules, SHA-256 content digests and
//! format-agnostic configuration loading.

pub mod checksum;
pub mod config;
pub mod error;
pub mod exclude;
pub mod record;
pub mod walk;

pub use checksum::{compute_content_checksum, compute_file_checksum};
pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
pub use exclude::{ExcludeRules, should_skip};
pub use record::{FileRecord, ReferenceRoot};
pub use walk::{Collection, collect};
