// src/analyzer/rules.rs
//! Analyzer rule identifiers this crate knows how to repair.
//!
//! Identifiers follow the names the analyzer uses in its reports.

/// Static method declared `final`.
pub const FINAL_STATIC_METHOD: &str = "FinalStaticMethod";
/// Assertion that can be replaced by a more specific one.
pub const SIMPLIFIABLE_ASSERTION: &str = "SimplifiableAssertion";
/// JUnit 4 construct with a JUnit 5 replacement.
pub const JUNIT5_CONVERTER: &str = "JUnit5Converter";

/// Every repairable rule.
pub const ALL: &[&str] = &[FINAL_STATIC_METHOD, SIMPLIFIABLE_ASSERTION, JUNIT5_CONVERTER];

#[must_use]
pub fn is_known(rule_id: &str) -> bool {
    ALL.contains(&rule_id)
}
