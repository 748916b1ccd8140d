// src/transform/context.rs
//! Per-call context handed to processors.

use std::path::Path;

use crate::analyzer::AnalyzerFinding;
use crate::error::Result;
use crate::history::{AffectedType, Category, Change};
use crate::imports::{self, RemovalOutcome};
use crate::tree::{factory, Executable, NodeId, SyntaxTree};

/// Everything one processor invocation may touch: the tree it edits, the
/// finding that selected the node (if any) and the changes it records.
pub struct ProcessContext<'a> {
    tree: &'a mut SyntaxTree,
    finding: Option<&'a AnalyzerFinding>,
    changes: Vec<Change>,
}

impl<'a> ProcessContext<'a> {
    pub fn new(tree: &'a mut SyntaxTree, finding: Option<&'a AnalyzerFinding>) -> Self {
        Self {
            tree,
            finding,
            changes: Vec::new(),
        }
    }

    #[must_use]
    pub fn tree(&self) -> &SyntaxTree {
        &*self.tree
    }

    pub fn tree_mut(&mut self) -> &mut SyntaxTree {
        &mut *self.tree
    }

    #[must_use]
    pub fn file(&self) -> &Path {
        self.tree.path()
    }

    #[must_use]
    pub fn finding(&self) -> Option<&AnalyzerFinding> {
        self.finding
    }

    /// The type `node` belongs to, or the file itself for top-level nodes.
    #[must_use]
    pub fn affected_type(&self, node: NodeId) -> AffectedType {
        AffectedType::of(&*self.tree, node)
    }

    /// Records one change against the type enclosing `node`.
    pub fn record(&mut self, node: NodeId, summary: impl Into<String>, category: Category) {
        let mut change = Change::new(summary, category, self.affected_type(node));
        if let Some(finding) = self.finding {
            change = change.with_finding(finding.clone());
        }
        self.changes.push(change);
    }

    /// Number of changes recorded so far.
    #[must_use]
    pub fn recorded(&self) -> usize {
        self.changes.len()
    }

    /// Runs `edit` on its own. If it fails, only its tree edits and recorded
    /// changes are undone and the error is returned.
    ///
    /// # Errors
    /// Returns whatever `edit` returns.
    pub fn attempt<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let savepoint = self.tree.savepoint();
        let recorded = self.changes.len();
        let result = edit(self);
        if result.is_ok() {
            self.tree.release(savepoint);
        } else {
            self.tree.rollback_to(savepoint);
            self.changes.truncate(recorded);
        }
        result
    }

    #[must_use]
    pub fn into_changes(self) -> Vec<Change> {
        self.changes
    }

    // --- construction ---

    /// # Errors
    /// Returns error if an argument is missing or attached.
    pub fn create_invocation(&mut self, executable: Executable, arguments: &[NodeId]) -> Result<NodeId> {
        factory::create_invocation(self.tree, executable, arguments)
    }

    pub fn create_annotation(&mut self, type_name: &str) -> NodeId {
        factory::create_annotation(self.tree, type_name)
    }

    /// # Errors
    /// Returns error if `id` does not exist.
    pub fn clone_node(&mut self, id: NodeId) -> Result<NodeId> {
        self.tree.clone_subtree(id)
    }

    // --- imports ---

    /// # Errors
    /// Returns error if the tree rejects the insertion.
    pub fn add_import(&mut self, symbol: &str, is_static: bool) -> Result<bool> {
        imports::add_import_if_absent(self.tree, symbol, is_static)
    }

    /// # Errors
    /// Returns error if the tree rejects the removal.
    pub fn remove_import_if_unused(&mut self, symbol: &str, is_static: bool) -> Result<RemovalOutcome> {
        imports::remove_import_if_unused(self.tree, symbol, is_static)
    }
}
