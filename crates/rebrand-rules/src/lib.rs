//! rebrand-rules: Ordered substitution rules
//!
//! A [`RuleSet`] is an ordered list of [`Rule`]s applied as a left fold: each
//! rule rewrites the output of the previous one. Rules come from a built-in
//! preset (see [`presets`]) or from a YAML file (see [`yaml`]).
//!
//! Matcher kinds:
//! - identifier: whole-word token, bounded by non-identifier characters
//! - literal: exact substring, no boundary checks

mod error;
pub mod presets;
mod rule;
mod rule_set;
pub mod yaml;

pub use error::RuleError;
pub use presets::{list_presets, preset, DEFAULT_PRESET};
pub use rule::{MatcherKind, Rule};
pub use rule_set::RuleSet;
