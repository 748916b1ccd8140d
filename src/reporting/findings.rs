// src/reporting/findings.rs
use std::collections::BTreeMap;
use std::fmt::Write;

use super::{code_block, path_markdown};
use crate::analyzer::{active_findings, AnalyzerFinding};
use crate::error::Result;

const SNIPPET_LANGUAGE: &str = "java";

/// Findings this crate can repair, one section each.
///
/// # Errors
/// Returns error if formatting fails.
pub fn print_results(findings: &[AnalyzerFinding], active_rules: &[String]) -> Result<String> {
    let active = active_findings(findings, active_rules);
    let mut out = String::from("# Bad smells\n");
    writeln!(out, "I found {} bad smells:", active.len())?;
    for finding in active {
        write_finding(&mut out, "##", finding)?;
    }
    Ok(out)
}

/// Every finding, with a per-rule summary table and collapsible details.
///
/// # Errors
/// Returns error if formatting fails.
pub fn print_all_results(findings: &[AnalyzerFinding], active_rules: &[String]) -> Result<String> {
    let fixable = active_findings(findings, active_rules).len();
    let mut out = String::from("# Bad smells\n");
    writeln!(
        out,
        "I found {} bad smells with {fixable} repairable:",
        findings.len()
    )?;

    let grouped = group_by_rule(findings);
    writeln!(out, "| ruleID | number | fixable |")?;
    writeln!(out, "| --- | --- | --- |")?;
    for (rule, group) in &grouped {
        let repairable = active_rules.iter().any(|r| r == rule);
        writeln!(out, "| {rule} | {} | {repairable} |", group.len())?;
    }

    for (rule, group) in &grouped {
        writeln!(out, "## {rule}")?;
        writeln!(out, "<details>")?;
        for finding in group {
            write_finding(&mut out, "###", finding)?;
        }
        writeln!(out, "</details>")?;
    }
    Ok(out)
}

fn group_by_rule(findings: &[AnalyzerFinding]) -> BTreeMap<&str, Vec<&AnalyzerFinding>> {
    let mut grouped: BTreeMap<&str, Vec<&AnalyzerFinding>> = BTreeMap::new();
    for finding in findings {
        grouped.entry(finding.rule_id.as_str()).or_default().push(finding);
    }
    grouped
}

fn write_finding(out: &mut String, heading: &str, finding: &AnalyzerFinding) -> Result<()> {
    writeln!(out, "{heading} {}", finding.rule_id)?;
    writeln!(out, "{}", finding.message)?;
    match finding.line {
        Some(line) => writeln!(out, "in {} line {line}", path_markdown(&finding.file_path))?,
        None => writeln!(out, "in {}", path_markdown(&finding.file_path))?,
    }
    writeln!(out, "{heading}# Snippet")?;
    out.push_str(&code_block(SNIPPET_LANGUAGE, &finding.snippet));
    Ok(())
}

#[cfg(test)]
#[path = "findings_test.rs"]
mod tests;
