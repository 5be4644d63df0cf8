//! Per-root and per-file results of a rename run

use std::io;
use std::path::{Path, PathBuf};
use std::str::Utf8Error;
use thiserror::Error;

/// Why a single file could not be processed.
///
/// These never abort a run; they are turned into [`FileStatus::Errored`].
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("cannot decode as UTF-8: {0}")]
    Decode(#[from] Utf8Error),

    #[error("{0}")]
    Io(#[from] io::Error),
}

impl ProcessError {
    /// Short machine-readable kind for structured output
    pub fn kind(&self) -> &'static str {
        match self {
            ProcessError::Decode(_) => "decode",
            ProcessError::Io(_) => "io",
        }
    }
}

/// Terminal state of one file
#[derive(Debug)]
pub enum FileStatus {
    /// Rules produced identical content; nothing was written
    Unchanged,
    /// New content was written back
    Changed { replacements: usize },
    Errored(ProcessError),
}

/// Result of processing a single file
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn unchanged(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            status: FileStatus::Unchanged,
        }
    }

    pub fn changed(path: &Path, replacements: usize) -> Self {
        Self {
            path: path.to_path_buf(),
            status: FileStatus::Changed { replacements },
        }
    }

    pub fn errored(path: &Path, error: impl Into<ProcessError>) -> Self {
        Self {
            path: path.to_path_buf(),
            status: FileStatus::Errored(error.into()),
        }
    }
}

/// Anything the walker reports
#[derive(Debug)]
pub enum Outcome {
    /// A configured root does not exist; the walk continued without it
    MissingRoot(PathBuf),
    File(FileOutcome),
}

impl Outcome {
    pub fn path(&self) -> &Path {
        match self {
            Outcome::MissingRoot(path) => path,
            Outcome::File(file) => &file.path,
        }
    }
}

impl From<FileOutcome> for Outcome {
    fn from(file: FileOutcome) -> Self {
        Outcome::File(file)
    }
}
