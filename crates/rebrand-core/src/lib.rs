//! rebrand-core: Core abstractions for codebase-wide renames
//!
//! This crate provides:
//! - `FileSystem`: The capability every disk access goes through
//! - `OsFileSystem` / `MemoryFileSystem`: Real and in-memory implementations
//! - `Outcome` / `FileOutcome`: What happened to a root or a file
//! - `RunSummary`: Aggregate of all outcomes in a run

pub mod fs;
mod outcome;
mod summary;

pub use fs::{FileSystem, ListError, MemoryFileSystem, OsFileSystem};
pub use outcome::{FileOutcome, FileStatus, Outcome, ProcessError};
pub use summary::{FileError, RunSummary};
