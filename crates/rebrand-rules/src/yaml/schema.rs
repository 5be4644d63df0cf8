//! YAML rule file schema

use serde::{Deserialize, Serialize};

use crate::rule::{MatcherKind, Rule};
use crate::RuleError;

/// A complete rule file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleFile {
    /// Campaign name, shown in reports
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Rules in application order
    pub rules: Vec<RuleSpec>,
}

fn default_name() -> String {
    "custom".to_string()
}

/// One rule entry
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    /// Whole-word token to match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Exact substring to match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,

    pub replace: String,
}

impl RuleSpec {
    /// Check that exactly one matcher is set
    pub fn validate(&self) -> Result<(), String> {
        match (&self.identifier, &self.literal) {
            (Some(_), Some(_)) => Err(format!(
                "rule replacing with '{}' sets both 'identifier' and 'literal'",
                self.replace
            )),
            (None, None) => Err(format!(
                "rule replacing with '{}' needs 'identifier' or 'literal'",
                self.replace
            )),
            _ => Ok(()),
        }
    }

    /// The matcher kind and pattern, if valid
    pub fn matcher(&self) -> Option<(MatcherKind, &str)> {
        match (&self.identifier, &self.literal) {
            (Some(token), None) => Some((MatcherKind::Identifier, token.as_str())),
            (None, Some(text)) => Some((MatcherKind::Literal, text.as_str())),
            _ => None,
        }
    }

    /// Compile into a [`Rule`]. Call [`RuleSpec::validate`] first.
    pub fn to_rule(&self) -> Result<Rule, RuleError> {
        match self.matcher() {
            Some((kind, find)) => Rule::new(kind, find, self.replace.as_str()),
            None => Err(RuleError::EmptyPattern),
        }
    }
}
