//! File processing logic for rebrand

use std::path::Path;

use rebrand_core::{FileOutcome, FileSystem, ProcessError};
use rebrand_rules::RuleSet;

/// Rewrite a single file with the rule set.
///
/// The file is written back only when the rewritten text differs from what
/// was read. Every failure is captured in the returned outcome; nothing here
/// aborts the caller.
pub fn process_file(fs: &dyn FileSystem, rules: &RuleSet, path: &Path) -> FileOutcome {
    match rewrite_file(fs, rules, path) {
        Ok(Some(replacements)) => FileOutcome::changed(path, replacements),
        Ok(None) => FileOutcome::unchanged(path),
        Err(error) => FileOutcome::errored(path, error),
    }
}

/// Returns the replacement count if the file was rewritten
fn rewrite_file(
    fs: &dyn FileSystem,
    rules: &RuleSet,
    path: &Path,
) -> Result<Option<usize>, ProcessError> {
    let bytes = fs.read(path)?;
    let source = std::str::from_utf8(&bytes)?;

    let (rewritten, replacements) = rules.apply_counted(source);

    // Rules can produce identical text (e.g. a rename back to itself)
    if rewritten == source {
        return Ok(None);
    }

    fs.write(path, rewritten.as_bytes())?;
    Ok(Some(replacements))
}
