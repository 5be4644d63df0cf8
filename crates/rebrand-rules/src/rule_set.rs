//! Ordered rule application

use crate::rule::Rule;

/// An immutable, ordered list of rules.
///
/// Order is part of the contract: rules run first to last and each one sees
/// the output of the rule before it. Compound names must therefore be listed
/// ahead of the shorter tokens they start with.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    name: String,
    description: String,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            rules,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order and return the final text
    pub fn apply(&self, source: &str) -> String {
        self.apply_counted(source).0
    }

    /// Apply every rule in order, also counting replacements across all rules
    pub fn apply_counted(&self, source: &str) -> (String, usize) {
        let mut current = source.to_string();
        let mut total = 0;

        for rule in &self.rules {
            let (next, count) = rule.rewrite(&current);
            if count > 0 {
                current = next.into_owned();
                total += count;
            }
        }

        (current, total)
    }
}
