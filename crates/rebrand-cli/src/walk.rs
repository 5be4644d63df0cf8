//! Root traversal for rebrand

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use rebrand_core::{FileOutcome, FileSystem, Outcome};
use rebrand_rules::RuleSet;

use crate::process::process_file;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
}

/// Decides which listed files are eligible for rewriting
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    extensions: Vec<String>,
    exclude: Vec<(String, glob::Pattern)>,
}

impl FileFilter {
    /// `extensions` are file name suffixes (`.js`); `exclude` are glob patterns,
    /// or `dir/` to skip a directory anywhere in the path.
    pub fn new(extensions: Vec<String>, exclude: &[String]) -> Result<Self, FilterError> {
        let exclude = exclude
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern)
                    .map(|compiled| (pattern.clone(), compiled))
                    .map_err(|source| FilterError::Pattern {
                        pattern: pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            extensions,
            exclude,
        })
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether the file name ends with a configured suffix and no exclude
    /// matches its path below `root`.
    ///
    /// Directories above the root never take part in exclusion.
    pub fn is_eligible(&self, path: &Path, root: &Path) -> bool {
        let Some(file_name) = path.file_name() else {
            return false;
        };
        if !self
            .extensions
            .iter()
            .any(|ext| file_name.to_string_lossy().ends_with(ext.as_str()))
        {
            return false;
        }

        // A root that is the file itself leaves only the file name to match
        let relative = match path.strip_prefix(root) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative,
            _ => Path::new(file_name),
        };
        !self.should_exclude(relative)
    }

    /// Check if a root-relative path should be excluded based on the exclude patterns
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for (pattern, glob_pattern) in &self.exclude {
            if glob_pattern.matches(&path_str) {
                return true;
            }
            if let Some(file_name) = path.file_name() {
                if glob_pattern.matches(&file_name.to_string_lossy()) {
                    return true;
                }
            }

            // Directory patterns match at any depth
            if pattern.ends_with('/') {
                let dir_pattern = pattern.trim_end_matches('/');
                if path_str.contains(&format!("/{}/", dir_pattern))
                    || path_str.starts_with(&format!("{}/", dir_pattern))
                {
                    return true;
                }
            }
        }

        false
    }
}

/// Drives [`process_file`] over every eligible file under a set of roots
pub struct TreeWalker<'a> {
    fs: &'a dyn FileSystem,
    rules: &'a RuleSet,
    filter: &'a FileFilter,
    parallel: bool,
}

impl<'a> TreeWalker<'a> {
    pub fn new(fs: &'a dyn FileSystem, rules: &'a RuleSet, filter: &'a FileFilter) -> Self {
        Self {
            fs,
            rules,
            filter,
            parallel: false,
        }
    }

    /// Process eligible files on the rayon pool.
    ///
    /// Outcomes are still returned in traversal order.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Walk the roots in order and return one outcome per missing root,
    /// unlistable entry and eligible file.
    pub fn walk(&self, roots: &[PathBuf]) -> Vec<Outcome> {
        let mut outcomes = Vec::new();

        for root in roots {
            if !self.fs.exists(root) {
                outcomes.push(Outcome::MissingRoot(root.clone()));
                continue;
            }

            let mut eligible = Vec::new();
            for entry in self.fs.list_files(root) {
                match entry {
                    Ok(path) if self.filter.is_eligible(&path, root) => {
                        eligible.push(Slot::Process(path));
                    }
                    Ok(_) => {}
                    Err(err) => eligible.push(Slot::Failed(FileOutcome::errored(
                        &err.path,
                        err.source,
                    ))),
                }
            }

            outcomes.extend(self.process_all(eligible));
        }

        outcomes
    }

    fn process_all(&self, slots: Vec<Slot>) -> Vec<Outcome> {
        let run = |slot: Slot| -> Outcome {
            match slot {
                Slot::Process(path) => process_file(self.fs, self.rules, &path).into(),
                Slot::Failed(outcome) => outcome.into(),
            }
        };

        if self.parallel {
            slots.into_par_iter().map(run).collect()
        } else {
            slots.into_iter().map(run).collect()
        }
    }
}

/// A listed entry waiting to be processed, or one that already failed to list
enum Slot {
    Process(PathBuf),
    Failed(FileOutcome),
}
