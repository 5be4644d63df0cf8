//! YAML rule files
//!
//! A rule file names a campaign and lists its rules in application order.
//! Each rule sets exactly one of `identifier` or `literal`.
//!
//! # Example
//!
//! ```yaml
//! name: partner
//! description: Rename vendor to partner
//! rules:
//!   - identifier: vendorId
//!     replace: partnerId
//!   - identifier: vendor
//!     replace: partner
//!   - literal: "/vendor-"
//!     replace: "/partner-"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_rules_from_file, load_rules_from_string, LoadError};
pub use schema::{RuleFile, RuleSpec};
