//! A single substitution rule

use regex::Regex;
use std::borrow::Cow;
use std::fmt;

use crate::error::RuleError;

/// How a rule's pattern is located in the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    /// Whole-word token: a boundary is required on both sides, where a
    /// boundary is a switch between an identifier character (alphanumeric or
    /// underscore) and anything else, or a string edge.
    Identifier,
    /// Exact substring, wherever it occurs.
    Literal,
}

impl MatcherKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatcherKind::Identifier => "identifier",
            MatcherKind::Literal => "literal",
        }
    }
}

/// A matcher plus its replacement text
#[derive(Debug, Clone)]
pub struct Rule {
    kind: MatcherKind,
    find: String,
    replace: String,
    regex: Regex,
}

impl Rule {
    /// Rule matching `find` only as a whole word
    pub fn identifier(find: impl Into<String>, replace: impl Into<String>) -> Result<Self, RuleError> {
        let find = find.into();
        if find.is_empty() {
            return Err(RuleError::EmptyPattern);
        }

        let bounded = |c: Option<char>| c.is_some_and(is_identifier_char);
        if !bounded(find.chars().next()) || !bounded(find.chars().last()) {
            return Err(RuleError::InvalidIdentifier(find));
        }

        let pattern = format!(r"\b{}\b", regex::escape(&find));
        Self::build(MatcherKind::Identifier, find, replace.into(), &pattern)
    }

    /// Rule matching `find` as an exact substring
    pub fn literal(find: impl Into<String>, replace: impl Into<String>) -> Result<Self, RuleError> {
        let find = find.into();
        if find.is_empty() {
            return Err(RuleError::EmptyPattern);
        }

        let pattern = regex::escape(&find);
        Self::build(MatcherKind::Literal, find, replace.into(), &pattern)
    }

    /// Build a rule of the given kind
    pub fn new(
        kind: MatcherKind,
        find: impl Into<String>,
        replace: impl Into<String>,
    ) -> Result<Self, RuleError> {
        match kind {
            MatcherKind::Identifier => Self::identifier(find, replace),
            MatcherKind::Literal => Self::literal(find, replace),
        }
    }

    fn build(kind: MatcherKind, find: String, replace: String, pattern: &str) -> Result<Self, RuleError> {
        let regex = Regex::new(pattern).map_err(|source| RuleError::Pattern {
            pattern: find.clone(),
            source,
        })?;

        Ok(Self {
            kind,
            find,
            replace,
            regex,
        })
    }

    pub fn kind(&self) -> MatcherKind {
        self.kind
    }

    pub fn find(&self) -> &str {
        &self.find
    }

    pub fn replace(&self) -> &str {
        &self.replace
    }

    /// Replace every non-overlapping match, scanning left to right.
    ///
    /// Returns the rewritten text (borrowed when nothing matched) and the
    /// number of replacements. The replacement is inserted verbatim.
    pub fn rewrite<'s>(&self, source: &'s str) -> (Cow<'s, str>, usize) {
        let mut matches = self.regex.find_iter(source).peekable();
        if matches.peek().is_none() {
            return (Cow::Borrowed(source), 0);
        }

        let mut output = String::with_capacity(source.len());
        let mut last = 0;
        let mut count = 0;

        for m in matches {
            output.push_str(&source[last..m.start()]);
            output.push_str(&self.replace);
            last = m.end();
            count += 1;
        }
        output.push_str(&source[last..]);

        (Cow::Owned(output), count)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} -> {:?}", self.kind.as_str(), self.find, self.replace)
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(rule: &Rule, source: &str) -> String {
        rule.rewrite(source).0.into_owned()
    }

    #[test]
    fn test_identifier_whole_words_only() {
        let rule = Rule::identifier("vendor", "partner").unwrap();

        assert_eq!(rewrite(&rule, "the vendor arrived"), "the partner arrived");
        assert_eq!(rewrite(&rule, "vendor."), "partner.");
        assert_eq!(rewrite(&rule, "vendor"), "partner");
        assert_eq!(rewrite(&rule, "vendor_profile"), "vendor_profile");
        assert_eq!(rewrite(&rule, "vendorId"), "vendorId");
        assert_eq!(rewrite(&rule, "my_vendor"), "my_vendor");
        assert_eq!(rewrite(&rule, "vendor2"), "vendor2");
    }

    #[test]
    fn test_identifier_punctuation_is_boundary() {
        let rule = Rule::identifier("vendor", "partner").unwrap();

        assert_eq!(rewrite(&rule, "/vendor-list"), "/partner-list");
        assert_eq!(rewrite(&rule, "obj.vendor.name"), "obj.partner.name");
        assert_eq!(rewrite(&rule, "'vendor'"), "'partner'");
        assert_eq!(rewrite(&rule, "$vendor"), "$partner");
    }

    #[test]
    fn test_identifier_is_case_sensitive() {
        let rule = Rule::identifier("vendor", "partner").unwrap();
        assert_eq!(rewrite(&rule, "Vendor VENDOR vendor"), "Vendor VENDOR partner");
    }

    #[test]
    fn test_identifier_counts_every_match() {
        let rule = Rule::identifier("client", "user").unwrap();
        let (output, count) = rule.rewrite("client, client; client");
        assert_eq!(output, "user, user; user");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_literal_ignores_boundaries() {
        let rule = Rule::literal("/vendors", "/partners").unwrap();

        assert_eq!(rewrite(&rule, "'/vendorsList'"), "'/partnersList'");
        assert_eq!(rewrite(&rule, "api/vendors/1"), "api/partners/1");
    }

    #[test]
    fn test_literal_quoted() {
        let rule = Rule::literal("'/clients'", "'/users'").unwrap();

        assert_eq!(rewrite(&rule, "get('/clients', h)"), "get('/users', h)");
        assert_eq!(rewrite(&rule, "get('/clients/1', h)"), "get('/clients/1', h)");
    }

    #[test]
    fn test_literal_regex_metacharacters_are_escaped() {
        let rule = Rule::literal("a.b", "x").unwrap();
        assert_eq!(rewrite(&rule, "a.b acb"), "x acb");
    }

    #[test]
    fn test_replacement_is_verbatim() {
        let rule = Rule::identifier("price", "$1amount").unwrap();
        assert_eq!(rewrite(&rule, "price"), "$1amount");
    }

    #[test]
    fn test_no_match_borrows() {
        let rule = Rule::identifier("vendor", "partner").unwrap();
        let (output, count) = rule.rewrite("nothing here");
        assert!(matches!(output, Cow::Borrowed(_)));
        assert_eq!(count, 0);
    }

    #[test]
    fn test_non_overlapping_left_to_right() {
        let rule = Rule::literal("aa", "b").unwrap();
        assert_eq!(rewrite(&rule, "aaa"), "ba");
    }

    #[test]
    fn test_unicode_neighbours() {
        let rule = Rule::identifier("client", "user").unwrap();
        // Non-ASCII letters are identifier characters
        assert_eq!(rewrite(&rule, "clienté client"), "clienté user");
        assert_eq!(rewrite(&rule, "«client»"), "«user»");
    }

    #[test]
    fn test_invalid_rules() {
        assert!(matches!(Rule::identifier("", "x"), Err(RuleError::EmptyPattern)));
        assert!(matches!(Rule::literal("", "x"), Err(RuleError::EmptyPattern)));
        assert!(matches!(
            Rule::identifier("/vendor", "x"),
            Err(RuleError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            Rule::identifier("vendor-", "x"),
            Err(RuleError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_display() {
        let rule = Rule::new(MatcherKind::Literal, "/vendor-", "/partner-").unwrap();
        assert_eq!(rule.to_string(), r#"literal "/vendor-" -> "/partner-""#);
    }
}
