//! Virtual filesystem boundary for chart loading
//!
//! A chart can live anywhere: on disk, embedded in a binary, or built up in
//! memory by a test. `ChartFs` is the read-only boundary the loader walks.
//! Chart files must sit at the root of the filesystem (`Chart.yaml`,
//! `values.yaml`, `templates/...`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// Kind of a filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
}

/// One entry reported by a filesystem walk
#[derive(Debug, Clone)]
pub struct FsEntry {
    /// Path relative to the filesystem root
    pub path: String,
    pub kind: EntryKind,
}

/// Read-only hierarchical file store
///
/// Implementations report every entry under the root (recursively, in a
/// deterministic order) and read full file contents by relative path.
pub trait ChartFs {
    /// Enumerate all entries under the root.
    fn entries(&self) -> Result<Vec<FsEntry>>;

    /// Read the full content of the file at `path`.
    fn read(&self, path: &str) -> Result<Vec<u8>>;
}

/// Disk-backed chart filesystem rooted at a directory
#[derive(Debug, Clone)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }
}

impl ChartFs for DirFs {
    fn entries(&self) -> Result<Vec<FsEntry>> {
        let mut entries = Vec::new();

        for entry in walkdir::WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| CoreError::FileAccess {
                path: self.root.display().to_string(),
                message: format!("walk failed: {}", e),
            })?;

            let kind = if entry.path_is_symlink() {
                EntryKind::Symlink
            } else if entry.file_type().is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };

            entries.push(FsEntry {
                path: self.relative(entry.path()),
                kind,
            });
        }

        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        std::fs::read(self.root.join(path)).map_err(|e| CoreError::FileAccess {
            path: path.to_string(),
            message: format!("failed to read file: {}", e),
        })
    }
}

/// In-memory chart filesystem
///
/// The test and embedded-chart counterpart of `DirFs`: files are plain
/// (path, bytes) pairs with no directories or links.
#[derive(Debug, Default, Clone)]
pub struct MemoryFs {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryFs {
    /// Create a new empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file
    pub fn with_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.to_string(), content.into());
        self
    }

    /// Add a text file
    pub fn with_text_file(self, path: &str, content: &str) -> Self {
        self.with_file(path, content.as_bytes().to_vec())
    }

    /// Add multiple text files at once
    pub fn with_files(mut self, files: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
        for (path, content) in files {
            self.files
                .insert(path.to_string(), content.as_bytes().to_vec());
        }
        self
    }
}

impl ChartFs for MemoryFs {
    fn entries(&self) -> Result<Vec<FsEntry>> {
        Ok(self
            .files
            .keys()
            .map(|path| FsEntry {
                path: path.clone(),
                kind: EntryKind::File,
            })
            .collect())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| CoreError::FileAccess {
                path: path.to_string(),
                message: "file not found".to_string(),
            })
    }
}
