//! Exclusion rules for files that must not be compared
//!
//! Rules are literal substring and suffix tests on the root-relative path.
//! They are deliberately not globs: `/test/` matches anywhere in the path,
//! while `/Justfile` only matches at the very end. Matching is done on the
//! raw bytes of the path, so names that are not valid UTF-8 still match.

use std::ffi::OsStr;

use serde::{Deserialize, Serialize};

/// Substrings that exclude a path wherever they occur.
const DEFAULT_CONTAINS: &[&str] = &["/test/", "__pycache__"];

/// Suffixes that exclude a path when it ends with them.
const DEFAULT_SUFFIXES: &[&str] = &["/Justfile", "/system.conf"];

/// A set of exclusion rules, combined with logical OR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exclude when the path contains any of these substrings
    #[serde(default)]
    pub contains: Vec<String>,
    /// Exclude when the path ends with any of these suffixes
    #[serde(default)]
    pub suffixes: Vec<String>,
}

impl Default for ExcludeRules {
    fn default() -> Self {
        Self {
            contains: DEFAULT_CONTAINS.iter().map(|s| s.to_string()).collect(),
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ExcludeRules {
    /// Rules that never exclude anything.
    pub fn none() -> Self {
        Self {
            contains: Vec::new(),
            suffixes: Vec::new(),
        }
    }

    /// Decide whether `rel_path` is excluded from comparison.
    pub fn should_skip(&self, rel_path: impl AsRef<OsStr>) -> bool {
        let path = rel_path.as_ref().as_encoded_bytes();
        self.contains.iter().any(|c| contains_bytes(path, c.as_bytes()))
            || self.suffixes.iter().any(|s| path.ends_with(s.as_bytes()))
    }
}

/// Decide whether `rel_path` is excluded under the default rules.
///
/// Equivalent to `ExcludeRules::default().should_skip(rel_path)` without
/// allocating the rule set.
pub fn should_skip(rel_path: impl AsRef<OsStr>) -> bool {
    let path = rel_path.as_ref().as_encoded_bytes();
    DEFAULT_CONTAINS.iter().any(|c| contains_bytes(path, c.as_bytes()))
        || DEFAULT_SUFFIXES.iter().any(|s| path.ends_with(s.as_bytes()))
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}
