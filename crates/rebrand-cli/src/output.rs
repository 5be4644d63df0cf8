//! Output formatting for rebrand
//!
//! Supports text (colored terminal) and JSON output formats.

use colored::*;
use serde::Serialize;
use std::path::Path;

use rebrand_core::{FileStatus, Outcome, RunSummary};
use rebrand_rules::RuleSet;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<OutputFormat> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Result of processing a single file, as emitted in JSON
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub path: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacements: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Full JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub version: String,
    pub rule_set: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub summary: RunSummary,
    pub files: Vec<FileResult>,
}

/// Reporter for accumulating and outputting results.
///
/// Aggregation lives in [`RunSummary`]; this type only decides how each
/// outcome and the final totals are shown.
pub struct Reporter {
    format: OutputFormat,
    verbose: bool,
    rule_set: String,
    description: String,
    results: Vec<FileResult>,
    summary: RunSummary,
}

impl Reporter {
    pub fn new(format: OutputFormat, verbose: bool, rules: &RuleSet) -> Self {
        Self {
            format,
            verbose,
            rule_set: rules.name().to_string(),
            description: rules.description().to_string(),
            results: Vec::new(),
            summary: RunSummary::new(),
        }
    }

    /// Record one outcome and, in text mode, print its line
    pub fn record(&mut self, outcome: &Outcome) {
        self.summary.record(outcome);

        match outcome {
            Outcome::MissingRoot(path) => self.report_missing_root(path),
            Outcome::File(file) => match &file.status {
                FileStatus::Unchanged => self.report_unchanged(&file.path),
                FileStatus::Changed { replacements } => {
                    self.report_changed(&file.path, *replacements)
                }
                FileStatus::Errored(error) => self.report_error(&file.path, &error.to_string()),
            },
        }
    }

    fn report_missing_root(&mut self, path: &Path) {
        if self.format == OutputFormat::Text {
            println!("{} {}", "Directory not found:".yellow(), path.display());
        }
    }

    fn report_unchanged(&mut self, path: &Path) {
        if self.verbose && self.format == OutputFormat::Text {
            println!("{} {}", "Unchanged:".dimmed(), path.display());
        }
        self.results.push(FileResult {
            path: path.display().to_string(),
            status: "unchanged",
            replacements: None,
            error: None,
        });
    }

    fn report_changed(&mut self, path: &Path, replacements: usize) {
        if self.format == OutputFormat::Text {
            if self.verbose {
                println!(
                    "{} {} ({} replacement(s))",
                    "Updated:".green(),
                    path.display(),
                    replacements
                );
            } else {
                println!("{} {}", "Updated:".green(), path.display());
            }
        }
        self.results.push(FileResult {
            path: path.display().to_string(),
            status: "changed",
            replacements: Some(replacements),
            error: None,
        });
    }

    fn report_error(&mut self, path: &Path, error: &str) {
        if self.format == OutputFormat::Text {
            println!(
                "{} {}: {}",
                "Error processing".red(),
                path.display(),
                error
            );
        }
        self.results.push(FileResult {
            path: path.display().to_string(),
            status: "error",
            replacements: None,
            error: Some(error.to_string()),
        });
    }

    /// Print final summary/output
    pub fn finish(self) {
        match self.format {
            OutputFormat::Text => {
                println!();
                println!(
                    "{} {}",
                    "Total files changed:".bold(),
                    self.summary.files_changed
                );
                if self.verbose {
                    println!("  Files processed: {}", self.summary.files_processed);
                    println!("  Replacements: {}", self.summary.total_replacements);
                }
                if !self.summary.missing_roots.is_empty() {
                    println!("  Missing directories: {}", self.summary.missing_roots.len());
                }
                if self.summary.has_errors() {
                    println!("  Errors: {}", self.summary.errors.len());
                }
            }
            OutputFormat::Json => {
                let output = self.into_json();
                match serde_json::to_string_pretty(&output) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("{}: {}", "Error".red(), e),
                }
            }
        }
    }

    fn into_json(self) -> JsonOutput {
        JsonOutput {
            version: env!("CARGO_PKG_VERSION").to_string(),
            rule_set: self.rule_set,
            description: self.description,
            summary: self.summary,
            files: self.results,
        }
    }

    /// Get summary for exit code determination
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }
}
