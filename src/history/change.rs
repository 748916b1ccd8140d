// src/history/change.rs
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::analyzer::AnalyzerFinding;
use crate::tree::{NodeData, NodeId, SyntaxTree};

/// The smell category a change repairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub description: &'static str,
}

/// The top-level type a change touched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AffectedType {
    pub qualified_name: String,
    pub file: PathBuf,
}

impl AffectedType {
    pub fn new(qualified_name: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            file: file.into(),
        }
    }

    /// The outermost type enclosing `node`, or the file itself for nodes
    /// outside any type.
    #[must_use]
    pub fn of(tree: &SyntaxTree, node: NodeId) -> Self {
        let name = tree
            .top_level_type(node)
            .and_then(|ty| match tree.data(ty) {
                Some(NodeData::Type { qualified_name }) => Some(qualified_name.clone()),
                _ => None,
            })
            .unwrap_or_else(|| tree.path().display().to_string());
        Self::new(name, tree.path())
    }
}

impl fmt::Display for AffectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)
    }
}

/// One applied edit. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    summary: String,
    category: Category,
    affected_type: AffectedType,
    #[serde(skip_serializing_if = "Option::is_none")]
    finding: Option<AnalyzerFinding>,
}

impl Change {
    pub fn new(summary: impl Into<String>, category: Category, affected_type: AffectedType) -> Self {
        Self {
            summary: summary.into(),
            category,
            affected_type,
            finding: None,
        }
    }

    /// Attaches a snapshot of the finding that triggered the change.
    #[must_use]
    pub fn with_finding(mut self, finding: AnalyzerFinding) -> Self {
        self.finding = Some(finding);
        self
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn affected_type(&self) -> &AffectedType {
        &self.affected_type
    }

    #[must_use]
    pub fn finding(&self) -> Option<&AnalyzerFinding> {
        self.finding.as_ref()
    }
}
