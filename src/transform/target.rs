// src/transform/target.rs
//! Targets restrict where processors may fire.

use std::path::{Path, PathBuf};

use crate::analyzer::{rules, AnalyzerFinding};
use crate::smells::{
    AssertFalseEquals, AssertTrueEquals, BadSmell, BadSmellVisitor, FinalStaticMethod,
};

/// A place an analyzer rule asked to be repaired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub rule_id: String,
    pub file_path: PathBuf,
    pub line: Option<u32>,
    /// The finding this target came from, copied into resulting changes.
    pub finding: Option<AnalyzerFinding>,
}

impl Target {
    pub fn new(rule_id: impl Into<String>, file_path: impl Into<PathBuf>, line: Option<u32>) -> Self {
        Self {
            rule_id: rule_id.into(),
            file_path: file_path.into(),
            line,
            finding: None,
        }
    }

    #[must_use]
    pub fn from_finding(finding: &AnalyzerFinding) -> Self {
        Self {
            rule_id: finding.rule_id.clone(),
            file_path: finding.file_path.clone(),
            line: finding.line,
            finding: Some(finding.clone()),
        }
    }

    /// True if this target covers a node of `file` at `line` for `rule`.
    ///
    /// Files match when one path ends with the other, component-wise, so a
    /// finding reported relative to the project root still finds a unit
    /// loaded from an absolute path. Lines only need to agree when both
    /// sides carry one.
    #[must_use]
    pub fn matches(&self, rule: &str, file: &Path, line: Option<u32>) -> bool {
        if self.rule_id != rule {
            return false;
        }
        if !(file.ends_with(&self.file_path) || self.file_path.ends_with(file)) {
            return false;
        }
        match (self.line, line) {
            (Some(expected), Some(actual)) => expected == actual,
            _ => true,
        }
    }
}

/// Turns detected smells into engine targets.
#[derive(Debug, Default)]
pub struct TargetCollector {
    targets: Vec<Target>,
}

impl TargetCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn collect(smells: &[BadSmell]) -> Vec<Target> {
        let mut collector = Self::new();
        for smell in smells {
            smell.accept(&mut collector);
        }
        collector.targets
    }

    fn push(&mut self, rule: &str, node: &crate::smells::NodeRef) {
        self.targets
            .push(Target::new(rule, node.file.clone(), node.line));
    }
}

impl BadSmellVisitor for TargetCollector {
    type Output = ();

    fn visit_final_static_method(&mut self, smell: &FinalStaticMethod) {
        self.push(rules::FINAL_STATIC_METHOD, &smell.node);
    }

    fn visit_assert_false_equals(&mut self, smell: &AssertFalseEquals) {
        self.push(rules::SIMPLIFIABLE_ASSERTION, &smell.node);
    }

    fn visit_assert_true_equals(&mut self, smell: &AssertTrueEquals) {
        self.push(rules::SIMPLIFIABLE_ASSERTION, &smell.node);
    }
}

#[cfg(test)]
#[path = "target_test.rs"]
mod tests;
