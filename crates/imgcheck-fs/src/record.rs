//! Reference roots and the file records discovered beneath them
//!
//! Paths stay as [`Path`]/[`PathBuf`] end to end. Names that are not valid
//! UTF-8 are only made lossy when they are printed.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// A reference directory whose contents mirror the live filesystem layout.
///
/// Stripping the root prefix from a discovered file yields the absolute path
/// the file is expected at on the live system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRoot {
    /// The root as given by the caller
    given: PathBuf,
}

impl ReferenceRoot {
    /// Create a reference root from a user-supplied path.
    ///
    /// Trailing separators are kept for display and ignored when stripping,
    /// so `/expected`, `/expected/` and `/expected//` yield the same records.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            given: path.as_ref().to_path_buf(),
        }
    }

    /// The root exactly as it was given.
    pub fn as_path(&self) -> &Path {
        &self.given
    }

    /// Build a record for a file discovered under this root.
    ///
    /// Returns `None` if `absolute` is not strictly below the root.
    pub fn record(&self, absolute: impl Into<PathBuf>) -> Option<FileRecord> {
        let absolute = absolute.into();
        let rest = absolute.strip_prefix(&self.given).ok()?;
        if rest.as_os_str().is_empty() {
            return None;
        }
        let relative = Path::new("/").join(rest);
        Some(FileRecord { absolute, relative })
    }
}

impl std::fmt::Display for ReferenceRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.given.display())
    }
}

/// A regular file found under a reference root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    absolute: PathBuf,
    relative: PathBuf,
}

impl FileRecord {
    /// The file's path inside the reference tree.
    pub fn absolute(&self) -> &Path {
        &self.absolute
    }

    /// The root-relative path, always starting with `/`.
    ///
    /// This is also where the file is expected on the live filesystem.
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// The relative path for report lines.
    pub fn display_path(&self) -> Cow<'_, str> {
        self.relative.to_string_lossy()
    }

    /// Resolve the live location of this file under `live_root`.
    ///
    /// With a live root of `/` this is the relative path itself.
    pub fn live_path(&self, live_root: &Path) -> PathBuf {
        match self.relative.strip_prefix("/") {
            Ok(rest) if live_root != Path::new("/") => live_root.join(rest),
            _ => self.relative.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("/expected", "/expected/etc/app.conf")]
    #[case("/expected/", "/expected/etc/app.conf")]
    #[case("/expected//", "/expected//etc/app.conf")]
    #[case("/", "/etc/app.conf")]
    fn trailing_slashes_do_not_change_relative(#[case] given: &str, #[case] found: &str) {
        let root = ReferenceRoot::new(given);
        let record = root.record(found).unwrap();
        assert_eq!(record.relative(), Path::new("/etc/app.conf"));
        assert_eq!(root.as_path(), Path::new(given));
        assert_eq!(root.to_string(), given);
    }

    #[test]
    fn record_keeps_absolute() {
        let root = ReferenceRoot::new("/expected/");
        let record = root.record("/expected/etc/app.conf").unwrap();
        assert_eq!(record.absolute(), Path::new("/expected/etc/app.conf"));
        assert_eq!(record.display_path(), "/etc/app.conf");
    }

    #[test]
    fn record_rejects_foreign_path() {
        let root = ReferenceRoot::new("/expected");
        assert!(root.record("/other/etc/app.conf").is_none());
        assert!(root.record("/expectedness/file").is_none());
        assert!(root.record("/expected").is_none());
    }

    #[test]
    fn live_path_defaults_to_relative() {
        let record = ReferenceRoot::new("/expected")
            .record("/expected/etc/app.conf")
            .unwrap();
        assert_eq!(record.live_path(Path::new("/")), PathBuf::from("/etc/app.conf"));
        assert_eq!(
            record.live_path(Path::new("/mnt/live")),
            PathBuf::from("/mnt/live/etc/app.conf")
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_survive_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = Path::new(OsStr::from_bytes(b"/ref\xff"));
        let found = root.join(OsStr::from_bytes(b"etc/caf\xe9.conf"));

        let record = ReferenceRoot::new(root).record(&found).unwrap();
        assert_eq!(
            record.relative().as_os_str().as_bytes(),
            b"/etc/caf\xe9.conf"
        );
        assert_eq!(
            record.live_path(Path::new("/")).as_os_str().as_bytes(),
            b"/etc/caf\xe9.conf"
        );
        assert_eq!(
            record.live_path(Path::new("/live")).as_os_str().as_bytes(),
            b"/live/etc/caf\xe9.conf"
        );
    }
}
