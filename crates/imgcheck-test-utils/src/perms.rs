//! Permission helpers for unreadable-file scenarios.

use std::path::{Path, PathBuf};

/// Whether tests run as root, which bypasses permission checks.
pub fn is_root() -> bool {
    match std::process::Command::new("id").arg("-u").output() {
        Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "0",
        Err(_) => false,
    }
}

/// Removes all permissions from a path and restores them on drop.
pub struct PermissionGuard {
    path: PathBuf,
    #[cfg(unix)]
    original: u32,
}

impl PermissionGuard {
    /// Make `path` inaccessible (mode `000`) until the guard is dropped.
    #[cfg(unix)]
    pub fn lock(path: &Path) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let original = std::fs::metadata(path).unwrap().permissions().mode();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o000)).unwrap();
        Self {
            path: path.to_path_buf(),
            original,
        }
    }
}

#[cfg(unix)]
impl Drop for PermissionGuard {
    fn drop(&mut self) {
        use std::os::unix::fs::PermissionsExt;

        let _ = std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(self.original));
    }
}
