//! SHA-256 checksum utilities
//!
//! Digests are plain lowercase hex (64 characters, no prefix) so they can be
//! printed verbatim in verification reports and compared as strings.

use sha2::{Digest, Sha256};
use std::path::Path;

use crate::{Error, Result};

/// Compute the SHA-256 checksum of in-memory content.
pub fn compute_content_checksum(content: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_ref());
    format!("{:x}", hasher.finalize())
}

/// Compute the SHA-256 checksum of a file's contents.
///
/// The whole file is read into memory before hashing.
///
/// # Errors
///
/// Returns [`Error::Io`] carrying `path` if the file cannot be opened or read.
pub fn compute_file_checksum(path: &Path) -> Result<String> {
    let content = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(compute_content_checksum(&content))
}
