// src/reporting/changelog.rs
use std::collections::HashSet;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::analyzer::AnalyzerFinding;
use crate::error::Result;
use crate::history::{Category, Change, ChangeSet};

const FINGERPRINT_PATTERN: &str = r"<!--\s*fingerprint:([0-9a-fA-F]+)\s*-->";
const SERIALIZE_PLACEHOLDER: &str = "Could not serialize finding";

static FINGERPRINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(FINGERPRINT_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// One bullet per change. A change made for a finding carries the finding as
/// a YAML comment followed by its fingerprint.
///
/// # Errors
/// Returns error if formatting fails.
pub fn print_change_log<'a>(changes: impl IntoIterator<Item = &'a Change>) -> Result<String> {
    let mut out = String::from("## Changes:\n");
    for change in changes {
        writeln!(out, "* {}", change.summary())?;
        if let Some(finding) = change.finding() {
            writeln!(out, "<!-- {} -->", finding_yaml(finding))?;
            writeln!(out, "<!-- fingerprint:{} -->", finding.fingerprint())?;
        }
    }
    Ok(out)
}

fn finding_yaml(finding: &AnalyzerFinding) -> String {
    match serde_yaml::to_string(finding) {
        Ok(yaml) => yaml.trim_end().replace("-->", "--\\>"),
        Err(error) => {
            warn!(%error, rule = %finding.rule_id, "could not serialize finding");
            SERIALIZE_PLACEHOLDER.to_string()
        }
    }
}

/// Header naming each distinct repaired category once, in first-appearance
/// order, with its description.
///
/// # Errors
/// Returns error if formatting fails.
pub fn print_repaired_issues<'a>(changes: impl IntoIterator<Item = &'a Change>) -> Result<String> {
    let mut out = String::from("# Repairing Code Style Issues\n");
    let mut seen: Vec<&Category> = Vec::new();
    for change in changes {
        let category = change.category();
        if seen.contains(&category) {
            continue;
        }
        seen.push(category);
        writeln!(out, "## {}", category.name)?;
        writeln!(out, "{}", category.description)?;
    }
    Ok(out)
}

/// Full body for one commit or pull request.
///
/// # Errors
/// Returns error if formatting fails.
pub fn print_change_set(set: &ChangeSet<'_>) -> Result<String> {
    let mut out = print_repaired_issues(set.changes.iter().copied())?;
    out.push('\n');
    out.push_str(&print_change_log(set.changes.iter().copied())?);
    Ok(out)
}

/// Fingerprints embedded in a previously rendered changelog.
#[must_use]
pub fn extract_fingerprints(text: &str) -> HashSet<String> {
    FINGERPRINT_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
#[path = "changelog_test.rs"]
mod tests;
