//! YAML rule loader
//!
//! Load a rule set from a YAML file or string.

use std::fs;
use std::path::Path;
use thiserror::Error;

use super::schema::RuleFile;
use crate::error::RuleError;
use crate::rule_set::RuleSet;

/// Errors that can occur when loading YAML rules
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid rule #{index}: {message}")]
    Validation { index: usize, message: String },

    #[error("Invalid rule #{index}: {source}")]
    Rule { index: usize, source: RuleError },
}

/// Load a rule set from a YAML string
pub fn load_rules_from_string(yaml: &str) -> Result<RuleSet, LoadError> {
    let file: RuleFile = serde_yaml::from_str(yaml)?;
    let mut rules = Vec::with_capacity(file.rules.len());

    // 1-based in messages, matching how people count entries in the file
    for (i, spec) in file.rules.iter().enumerate() {
        let index = i + 1;
        spec.validate()
            .map_err(|message| LoadError::Validation { index, message })?;
        let rule = spec
            .to_rule()
            .map_err(|source| LoadError::Rule { index, source })?;
        rules.push(rule);
    }

    Ok(RuleSet::new(file.name, rules).with_description(file.description))
}

/// Load a rule set from a YAML file
pub fn load_rules_from_file(path: &Path) -> Result<RuleSet, LoadError> {
    let content = fs::read_to_string(path)?;
    load_rules_from_string(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::MatcherKind;
    use tempfile::TempDir;

    const PARTNER_SUBSET: &str = r#"
name: partner-lite
description: Small subset
rules:
  - identifier: vendorId
    replace: partnerId
  - identifier: vendor
    replace: partner
  - literal: "/vendors"
    replace: "/partners"
  - literal: "'/clients'"
    replace: "'/users'"
"#;

    #[test]
    fn test_load_preserves_order() {
        let rules = load_rules_from_string(PARTNER_SUBSET).unwrap();

        assert_eq!(rules.name(), "partner-lite");
        assert_eq!(rules.description(), "Small subset");
        let finds: Vec<&str> = rules.rules().iter().map(|r| r.find()).collect();
        assert_eq!(finds, vec!["vendorId", "vendor", "/vendors", "'/clients'"]);
        assert_eq!(rules.rules()[2].kind(), MatcherKind::Literal);
    }

    #[test]
    fn test_loaded_rules_apply() {
        let rules = load_rules_from_string(PARTNER_SUBSET).unwrap();
        assert_eq!(
            rules.apply("get('/clients'); fetch('/vendorsAll' + vendorId + vendor)"),
            "get('/users'); fetch('/partnersAll' + partnerId + partner)"
        );
    }

    #[test]
    fn test_default_name() {
        let rules = load_rules_from_string("rules: []").unwrap();
        assert_eq!(rules.name(), "custom");
        assert!(rules.is_empty());
    }

    #[test]
    fn test_validation_error_reports_index() {
        let yaml = r#"
rules:
  - identifier: a
    replace: b
  - replace: c
"#;
        let err = load_rules_from_string(yaml).unwrap_err();
        assert!(matches!(err, LoadError::Validation { index: 2, .. }));
    }

    #[test]
    fn test_invalid_identifier_rejected() {
        let yaml = r#"
rules:
  - identifier: "/vendor"
    replace: "/partner"
"#;
        let err = load_rules_from_string(yaml).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Rule {
                index: 1,
                source: RuleError::InvalidIdentifier(_)
            }
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
rules:
  - regex: "a+"
    replace: b
"#;
        assert!(matches!(
            load_rules_from_string(yaml),
            Err(LoadError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rules.yaml");
        std::fs::write(&path, PARTNER_SUBSET).unwrap();

        let rules = load_rules_from_file(&path).unwrap();
        assert_eq!(rules.len(), 4);

        let missing = load_rules_from_file(&temp.path().join("missing.yaml"));
        assert!(matches!(missing, Err(LoadError::Io(_))));
    }
}
