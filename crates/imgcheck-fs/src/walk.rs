//! Deterministic collection of regular files under a reference root

use std::path::PathBuf;

use walkdir::WalkDir;

use crate::record::{FileRecord, ReferenceRoot};

/// The outcome of walking a reference root.
#[derive(Debug, Default)]
pub struct Collection {
    /// Regular files, sorted byte-wise by absolute path
    pub records: Vec<FileRecord>,
    /// Directories that could not be opened; their subtrees contributed nothing
    pub unreadable: Vec<PathBuf>,
}

impl Collection {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Collect every regular file under `root`.
///
/// Directories are descended, regular files are collected and every other
/// entry kind (symlinks, devices, sockets, fifos) is ignored. Symlinks are
/// never followed. A directory that cannot be opened is logged and skipped.
///
/// The result is sorted by the raw bytes of each absolute path, so it does
/// not depend on the order the filesystem returns entries in.
pub fn collect(root: &ReferenceRoot) -> Collection {
    let mut collection = Collection::default();
    let native = root.as_path().to_path_buf();

    match std::fs::metadata(&native) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            tracing::warn!("cannot open {}: not a directory", root);
            collection.unreadable.push(native);
            return collection;
        }
        Err(e) => {
            tracing::warn!("cannot open {}: {}", root, e);
            collection.unreadable.push(native);
            return collection;
        }
    }

    for entry in WalkDir::new(&native).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| native.clone());
                tracing::warn!("cannot open {}: {}", path.display(), e);
                collection.unreadable.push(path);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match root.record(entry.into_path()) {
            Some(record) => {
                tracing::debug!(path = %record.display_path(), "Collected file");
                collection.records.push(record);
            }
            None => tracing::debug!("Ignoring entry outside {}", root),
        }
    }

    collection
        .records
        .sort_by(|a, b| a.absolute().as_os_str().cmp(b.absolute().as_os_str()));
    collection
}
