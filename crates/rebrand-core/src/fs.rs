//! Filesystem capability
//!
//! The walker and the file processor never touch `std::fs` directly. They go
//! through [`FileSystem`], which lets traversal and rewriting run against
//! [`MemoryFileSystem`] in tests.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// A directory entry that could not be listed
#[derive(Error, Debug)]
#[error("Failed to list {}: {source}", path.display())]
pub struct ListError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Narrow set of filesystem operations needed by a rename run
pub trait FileSystem: Send + Sync {
    /// Whether anything (file or directory) exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Every regular file under `root`, recursively, in a stable order.
    ///
    /// A root that is itself a file yields just that file. Entries that cannot
    /// be listed are returned as errors in place so the caller can keep going.
    fn list_files(&self, root: &Path) -> Vec<Result<PathBuf, ListError>>;

    /// Read the full raw content of a file
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replace the content of a file
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// The real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_files(&self, root: &Path) -> Vec<Result<PathBuf, ListError>> {
        walkdir::WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => {
                    let file_type = entry.file_type();
                    // Symlinked directories are not followed. Any other link is
                    // listed, even a dangling one, so reading it fails per file.
                    let listed = file_type.is_file()
                        || (file_type.is_symlink() && !entry.path().is_dir());
                    listed.then(|| Ok(entry.into_path()))
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.to_path_buf());
                    Some(Err(ListError {
                        path,
                        source: io::Error::from(err),
                    }))
                }
            })
            .collect()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// In-memory filesystem double.
///
/// Records every read and write so tests can assert which files were opened,
/// and supports injecting read/write failures per path.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    unreadable: BTreeSet<PathBuf>,
    unwritable: BTreeSet<PathBuf>,
    unlistable: BTreeSet<PathBuf>,
    reads: Vec<PathBuf>,
    writes: Vec<PathBuf>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryFileSystem::insert`]
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add or replace a file
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.state().files.insert(path.into(), contents.into());
    }

    /// Register an empty directory
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.state().dirs.insert(path.into());
    }

    /// Make reads of `path` fail with `PermissionDenied`
    pub fn deny_read(&self, path: impl Into<PathBuf>) {
        self.state().unreadable.insert(path.into());
    }

    /// Make writes to `path` fail with `PermissionDenied`
    pub fn deny_write(&self, path: impl Into<PathBuf>) {
        self.state().unwritable.insert(path.into());
    }

    /// Make listing report `path` as an entry that cannot be read
    pub fn deny_list(&self, path: impl Into<PathBuf>) {
        self.state().unlistable.insert(path.into());
    }

    /// Current content of a file
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.state().files.get(path).cloned()
    }

    /// Paths passed to `read`, in call order
    pub fn reads(&self) -> Vec<PathBuf> {
        self.state().reads.clone()
    }

    /// Paths successfully written, in call order
    pub fn writes(&self) -> Vec<PathBuf> {
        self.state().writes.clone()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let state = self.state();
        state.files.keys().any(|f| f.starts_with(path))
            || state.dirs.iter().any(|d| d.starts_with(path))
    }

    fn list_files(&self, root: &Path) -> Vec<Result<PathBuf, ListError>> {
        let state = self.state();
        let mut listed: Vec<Result<PathBuf, ListError>> = state
            .files
            .keys()
            .filter(|f| f.starts_with(root))
            .filter(|f| !state.unlistable.iter().any(|u| f.starts_with(u)))
            .cloned()
            .map(Ok)
            .collect();

        for denied in state.unlistable.iter().filter(|u| u.starts_with(root)) {
            listed.push(Err(ListError {
                path: denied.clone(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            }));
        }

        listed
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let mut state = self.state();
        state.reads.push(path.to_path_buf());

        if state.unreadable.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
        }

        state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut state = self.state();

        if state.unwritable.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
        }

        state.files.insert(path.to_path_buf(), contents.to_vec());
        state.writes.push(path.to_path_buf());
        Ok(())
    }
}
