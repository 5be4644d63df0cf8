//! Run log for rebrand
//!
//! When a log file is configured, every step of a run is written there with a
//! millisecond timestamp: config loading, the active rules, each root and each
//! file outcome. Without a log file all calls are no-ops.

use std::fs::File;
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use rebrand_core::{FileStatus, Outcome, RunSummary};
use rebrand_rules::RuleSet;

static LOGGER: Mutex<Option<RunLogger>> = Mutex::new(None);

const SEPARATOR: &str = "============================================================";

/// Line-buffered run log; every line reaches the file as soon as it is written
pub struct RunLogger {
    out: LineWriter<File>,
}

impl RunLogger {
    /// Create the log file, replacing any previous run's log
    pub fn create(log_path: &Path) -> io::Result<Self> {
        Ok(Self {
            out: LineWriter::new(File::create(log_path)?),
        })
    }

    pub fn line(&mut self, message: &str) {
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        // A failing log write must never fail the run
        let _ = writeln!(self.out, "[{stamp}] {message}");
    }

    pub fn section(&mut self, title: &str) {
        for text in [SEPARATOR, title, SEPARATOR] {
            self.line(text);
        }
    }
}

fn with_logger(write: impl FnOnce(&mut RunLogger)) {
    let mut guard = LOGGER.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(logger) = guard.as_mut() {
        write(logger);
    }
}

/// Route all subsequent log calls to `log_path`
pub fn init_logger(log_path: &Path) -> io::Result<()> {
    let logger = RunLogger::create(log_path)?;
    *LOGGER.lock().unwrap_or_else(PoisonError::into_inner) = Some(logger);
    Ok(())
}

pub fn log(message: &str) {
    with_logger(|logger| logger.line(message));
}

pub fn section(title: &str) {
    with_logger(|logger| logger.section(title));
}

/// Check if logging is enabled
pub fn is_enabled() -> bool {
    LOGGER
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

/// Log configuration loading
pub fn log_config_load(path: Option<&Path>) {
    section("CONFIGURATION");
    match path {
        Some(path) => log(&format!("Loaded config from: {}", path.display())),
        None => log("No config file, using defaults"),
    }
}

/// Log the active rule set, in application order
pub fn log_rules(rules: &RuleSet) {
    if !is_enabled() {
        return;
    }
    section("RULES");
    log(&format!("Rule set: {} ({} rules)", rules.name(), rules.len()));
    for (index, rule) in rules.rules().iter().enumerate() {
        log(&format!("  [{}] {}", index + 1, rule));
    }
}

/// Log the walk parameters
pub fn log_walk_start(roots: &[PathBuf], extensions: &[String]) {
    if !is_enabled() {
        return;
    }
    section("WALK");
    for root in roots {
        log(&format!("Root: {}", root.display()));
    }
    log(&format!("Extensions: {}", extensions.join(", ")));
}

/// Log one outcome
pub fn log_outcome(outcome: &Outcome) {
    let path = outcome.path().display();
    let message = match outcome {
        Outcome::MissingRoot(_) => format!("MISSING ROOT: {path}"),
        Outcome::File(file) => match &file.status {
            FileStatus::Unchanged => format!("unchanged: {path}"),
            FileStatus::Changed { replacements } => {
                format!("CHANGED: {path} ({replacements} replacement(s))")
            }
            FileStatus::Errored(error) => format!("ERROR: {path} [{}] {error}", error.kind()),
        },
    };
    log(&message);
}

/// Log the run totals
pub fn log_run_complete(summary: &RunSummary) {
    section("RUN COMPLETE");
    log(&format!("Files processed: {}", summary.files_processed));
    log(&format!("Files changed: {}", summary.files_changed));
    log(&format!("Replacements: {}", summary.total_replacements));
    log(&format!("Missing roots: {}", summary.missing_roots.len()));
    log(&format!("Errors: {}", summary.errors.len()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_logger_writes_timestamped_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("run.log");

        let mut logger = RunLogger::create(&path).unwrap();
        logger.section("RULES");
        logger.line("hello");

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.starts_with('[')));
        assert!(lines[1].ends_with("] RULES"));
        assert!(lines[3].ends_with("] hello"));
    }

    #[test]
    fn test_run_logger_truncates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("run.log");
        std::fs::write(&path, "old content\n").unwrap();

        RunLogger::create(&path).unwrap().line("new");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("old content"));
    }
}
