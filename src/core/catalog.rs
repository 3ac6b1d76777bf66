//! Directory snapshots for triptych.
//!
//! A catalog is the ordered list of [Entry] values for one directory: all directories
//! first, then all files, each run sorted by name (byte order, case-sensitive).
//! Entries are immutable. A reload builds a new list instead of patching the old one.

use crate::core::kind::EntryKind;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A single directory entry as captured at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    path: PathBuf,
    name: String,
    is_dir: bool,
    size: u64,
    ext: String,
    modified: Option<SystemTime>,
}

impl Entry {
    /// Builds an entry by stat-ing `path`. Stat failures yield a zero-size file entry.
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let (is_dir, size, modified) = match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => (true, 0, meta.modified().ok()),
            Ok(meta) => (false, meta.len(), meta.modified().ok()),
            Err(_) => (false, 0, None),
        };

        let ext = if is_dir {
            String::new()
        } else {
            path.extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default()
        };

        Entry {
            path,
            name,
            is_dir,
            size,
            ext,
            modified,
        }
    }

    // Accessors

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn ext(&self) -> &str {
        &self.ext
    }

    #[inline]
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        is_hidden_name(&self.name)
    }

    pub fn kind(&self) -> EntryKind {
        if self.is_dir {
            EntryKind::Directory
        } else {
            EntryKind::from_ext(&self.ext)
        }
    }
}

#[inline]
fn is_hidden_name(name: &str) -> bool {
    name.as_bytes().first() == Some(&b'.')
}

/// Reads `path` into a sorted catalog.
///
/// Returns the io error from opening the directory. Errors on individual entries
/// skip that entry.
pub fn read(path: &Path, show_hidden: bool) -> io::Result<Vec<Entry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for item in fs::read_dir(path)? {
        let Ok(item) = item else { continue };
        let name = item.file_name();
        if !show_hidden && is_hidden_name(&name.to_string_lossy()) {
            continue;
        }
        let entry = Entry::from_path(item.path());
        if entry.is_dir() {
            dirs.push(entry);
        } else {
            files.push(entry);
        }
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));
    dirs.append(&mut files);
    Ok(dirs)
}

/// Loads a catalog, absorbing permission and io errors into an empty result.
pub fn load(path: &Path, show_hidden: bool) -> Vec<Entry> {
    match read(path, show_hidden) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "catalog load failed");
            Vec::new()
        }
    }
}
