//! [`TestTree`] builder for artifact verification scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a `reference/` tree and a `live/` tree.
///
/// Files are addressed by their live-filesystem path (e.g. `/etc/app.conf`).
/// The reference copy lands at `reference/etc/app.conf` and the live copy at
/// `live/etc/app.conf`.
///
/// # Example
///
/// ```rust,no_run
/// use imgcheck_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.add_both("/etc/app.conf", "A");
/// tree.add_reference("/etc/test/dbg.txt", "B");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create empty `reference/` and `live/` directories.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("reference")).unwrap();
        fs::create_dir_all(temp_dir.path().join("live")).unwrap();
        Self { temp_dir }
    }

    /// Return the root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn reference_root(&self) -> PathBuf {
        self.root().join("reference")
    }

    pub fn live_root(&self) -> PathBuf {
        self.root().join("live")
    }

    /// Path of `rel` inside the reference tree.
    pub fn reference_path(&self, rel: &str) -> PathBuf {
        self.reference_root().join(rel.trim_start_matches('/'))
    }

    /// Path of `rel` inside the live tree.
    pub fn live_path(&self, rel: &str) -> PathBuf {
        self.live_root().join(rel.trim_start_matches('/'))
    }

    /// Write a reference copy of `rel`.
    pub fn add_reference(&self, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
        write_with_parents(&self.reference_path(rel), content.as_ref())
    }

    /// Write a live copy of `rel`.
    pub fn add_live(&self, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
        write_with_parents(&self.live_path(rel), content.as_ref())
    }

    /// Write identical reference and live copies of `rel`.
    pub fn add_both(&self, rel: &str, content: impl AsRef<[u8]>) {
        self.add_reference(rel, content.as_ref());
        self.add_live(rel, content.as_ref());
    }

    /// Write a reference file that maps onto a real absolute path.
    ///
    /// The reference copy is placed so that stripping the reference root
    /// yields the absolute path of `live/<rel>`. This lets a verifier that
    /// resolves live paths from `/` see the live tree. Returns that absolute
    /// live path as a string.
    pub fn add_rooted_reference(&self, rel: &str, content: impl AsRef<[u8]>) -> String {
        let live = self.live_path(rel);
        let live_str = live.to_string_lossy().into_owned();
        write_with_parents(
            &self.reference_root().join(live_str.trim_start_matches('/')),
            content.as_ref(),
        );
        live_str
    }
}

fn write_with_parents(path: &Path, content: &[u8]) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content)
        .unwrap_or_else(|e| panic!("Could not write {}: {}", path.display(), e));
    path.to_path_buf()
}
