// src/smells/detect.rs
use tracing::debug;

use super::{AssertFalseEquals, AssertTrueEquals, BadSmell, FinalStaticMethod, NodeRef};
use crate::history::AffectedType;
use crate::transform::rules::junit::{assertion_over_equals, is_final_static_method};
use crate::tree::{Model, NodeId, NodeKind, SyntaxTree};

/// Read-only pass producing smells in tree order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmellDetector;

impl SmellDetector {
    #[must_use]
    pub fn detect(&self, model: &Model) -> Vec<BadSmell> {
        let smells: Vec<BadSmell> = model
            .units()
            .iter()
            .flat_map(|unit| self.detect_in_tree(&unit.tree))
            .collect();
        debug!(units = model.len(), smells = smells.len(), "detection finished");
        smells
    }

    #[must_use]
    pub fn detect_in_tree(&self, tree: &SyntaxTree) -> Vec<BadSmell> {
        let mut smells = Vec::new();
        for node in tree.descendants(tree.root()) {
            let smell = match tree.kind(node) {
                Some(NodeKind::Method) if is_final_static_method(tree, node) => {
                    Some(BadSmell::FinalStaticMethod(FinalStaticMethod::new(
                        AffectedType::of(tree, node),
                        node_ref(tree, node),
                    )))
                }
                Some(NodeKind::Invocation) => detect_assertion(tree, node),
                _ => None,
            };
            smells.extend(smell);
        }
        smells
    }
}

fn detect_assertion(tree: &SyntaxTree, node: NodeId) -> Option<BadSmell> {
    if assertion_over_equals(tree, node, "assertFalse").is_some() {
        return Some(BadSmell::AssertFalseEquals(AssertFalseEquals::new(
            AffectedType::of(tree, node),
            node_ref(tree, node),
        )));
    }
    if assertion_over_equals(tree, node, "assertTrue").is_some() {
        return Some(BadSmell::AssertTrueEquals(AssertTrueEquals::new(
            AffectedType::of(tree, node),
            node_ref(tree, node),
        )));
    }
    None
}

fn node_ref(tree: &SyntaxTree, node: NodeId) -> NodeRef {
    NodeRef {
        file: tree.path().to_path_buf(),
        node,
        line: tree.line(node),
    }
}
