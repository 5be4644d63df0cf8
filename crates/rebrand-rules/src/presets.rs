//! Built-in rule presets
//!
//! - partner: vendor -> partner, client -> user (identifiers and URL paths)

use crate::error::RuleError;
use crate::rule::{MatcherKind, Rule};
use crate::rule_set::RuleSet;

use crate::rule::MatcherKind::{Identifier, Literal};

/// Preset used when nothing else is configured
pub const DEFAULT_PRESET: &str = "partner";

type RuleTable = &'static [(MatcherKind, &'static str, &'static str)];

/// vendor -> partner, client -> user.
///
/// Compound names come before the bare token they start with, and URL path
/// literals run after all identifiers.
const PARTNER_RULES: RuleTable = &[
    (Identifier, "vendorId", "partnerId"),
    (Identifier, "VendorId", "PartnerId"),
    (Identifier, "vendorIds", "partnerIds"),
    (Identifier, "vendorEmail", "partnerEmail"),
    (Identifier, "vendorAddress", "partnerAddress"),
    (Identifier, "vendorProfile", "partnerProfile"),
    (Identifier, "VendorProfile", "PartnerProfile"),
    (Identifier, "vendorReview", "partnerReview"),
    (Identifier, "VendorReview", "PartnerReview"),
    (Identifier, "vendors", "partners"),
    (Identifier, "Vendors", "Partners"),
    (Identifier, "vendor", "partner"),
    (Identifier, "Vendor", "Partner"),
    (Identifier, "clientEmail", "userEmail"),
    (Identifier, "clientCount", "userCount"),
    (Identifier, "clients", "users"),
    (Identifier, "Clients", "Users"),
    (Identifier, "client", "user"),
    (Identifier, "Client", "User"),
    (Literal, "/vendor-", "/partner-"),
    (Literal, "/vendors", "/partners"),
    (Literal, "'/clients'", "'/users'"),
    (Literal, "\"/clients\"", "\"/users\""),
];

const PRESETS: &[(&str, &str, RuleTable)] = &[(
    "partner",
    "Rename vendor to partner and client to user, including URL paths",
    PARTNER_RULES,
)];

/// Look up a built-in preset by name
pub fn preset(name: &str) -> Result<RuleSet, RuleError> {
    let (name, description, table) = PRESETS
        .iter()
        .find(|(preset_name, _, _)| *preset_name == name)
        .ok_or_else(|| RuleError::UnknownPreset(name.to_string()))?;

    let rules = table
        .iter()
        .map(|(kind, find, replace)| Rule::new(*kind, *find, *replace))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RuleSet::new(*name, rules).with_description(*description))
}

/// All presets with their descriptions (for --list-presets)
pub fn list_presets() -> Vec<(&'static str, &'static str)> {
    PRESETS
        .iter()
        .map(|(name, description, _)| (*name, *description))
        .collect()
}
