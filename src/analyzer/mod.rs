// src/analyzer/mod.rs
//! Findings produced by the external static analyzer.

pub mod finding;
pub mod rules;

pub use self::finding::AnalyzerFinding;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{IoContext, Result};

/// Reads a JSON array of findings.
///
/// # Errors
/// Returns error if the file is unreadable or not a findings array.
pub fn load_findings(path: &Path) -> Result<Vec<AnalyzerFinding>> {
    let content = fs::read_to_string(path).with_path(path)?;
    parse_findings(&content)
}

/// Parses a JSON array of findings.
///
/// # Errors
/// Returns error if `json` is not a findings array.
pub fn parse_findings(json: &str) -> Result<Vec<AnalyzerFinding>> {
    Ok(serde_json::from_str(json)?)
}

/// Drops findings whose fingerprint was already reported.
#[must_use]
pub fn filter_new_findings(
    findings: Vec<AnalyzerFinding>,
    reported: &HashSet<String>,
) -> Vec<AnalyzerFinding> {
    findings
        .into_iter()
        .filter(|f| !reported.contains(&f.fingerprint()))
        .collect()
}

/// Keeps findings whose rule is in `active`.
#[must_use]
pub fn active_findings<'a>(
    findings: &'a [AnalyzerFinding],
    active: &[String],
) -> Vec<&'a AnalyzerFinding> {
    findings
        .iter()
        .filter(|f| active.iter().any(|r| *r == f.rule_id))
        .collect()
}

#[cfg(test)]
#[path = "analyzer_test.rs"]
mod tests;
