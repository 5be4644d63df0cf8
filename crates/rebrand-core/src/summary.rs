//! Aggregation of run outcomes

use serde::Serialize;
use std::path::PathBuf;

use crate::outcome::{FileStatus, Outcome};

/// A per-file error as recorded in the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub path: PathBuf,
    pub kind: String,
    pub message: String,
}

/// Totals for a whole run.
///
/// Updated exactly once per outcome, in the order outcomes are recorded.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_changed: usize,
    pub total_replacements: usize,
    pub changed: Vec<PathBuf>,
    pub missing_roots: Vec<PathBuf>,
    pub errors: Vec<FileError>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a summary from a complete sequence of outcomes
    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a Outcome>) -> Self {
        let mut summary = Self::new();
        for outcome in outcomes {
            summary.record(outcome);
        }
        summary
    }

    pub fn record(&mut self, outcome: &Outcome) {
        let file = match outcome {
            Outcome::MissingRoot(path) => {
                self.missing_roots.push(path.clone());
                return;
            }
            Outcome::File(file) => file,
        };

        self.files_processed += 1;
        match &file.status {
            FileStatus::Unchanged => {}
            FileStatus::Changed { replacements } => {
                self.files_changed += 1;
                self.total_replacements += replacements;
                self.changed.push(file.path.clone());
            }
            FileStatus::Errored(error) => {
                self.errors.push(FileError {
                    path: file.path.clone(),
                    kind: error.kind().to_string(),
                    message: error.to_string(),
                });
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
