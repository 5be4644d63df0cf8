//! Errors raised while building rules

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Rule pattern must not be empty")]
    EmptyPattern,

    #[error("Identifier '{0}' must start and end with a letter, digit or underscore")]
    InvalidIdentifier(String),

    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Unknown preset '{0}'. Use --list-presets to see available presets.")]
    UnknownPreset(String),
}
