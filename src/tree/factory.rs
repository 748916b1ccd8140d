// src/tree/factory.rs
//! Construction helpers for replacement nodes.

use super::{Executable, NodeData, NodeId, Role, SyntaxTree};
use crate::error::Result;

/// Builds a detached invocation of `executable` with the given detached
/// argument nodes.
///
/// # Errors
/// Returns error if an argument is missing or already attached.
pub fn create_invocation(
    tree: &mut SyntaxTree,
    executable: Executable,
    arguments: &[NodeId],
) -> Result<NodeId> {
    let invocation = tree.add(NodeData::invocation(executable));
    for arg in arguments {
        tree.attach(invocation, Role::Argument, *arg)?;
    }
    Ok(invocation)
}

/// Builds a detached annotation of the qualified type `type_name`.
pub fn create_annotation(tree: &mut SyntaxTree, type_name: &str) -> NodeId {
    tree.add(NodeData::annotation(type_name))
}

/// Builds a detached import of `symbol`.
pub fn create_import(tree: &mut SyntaxTree, symbol: &str, is_static: bool) -> NodeId {
    tree.add(NodeData::import(symbol, is_static))
}

/// Moves a copy of `from`'s comments onto `to`.
///
/// # Errors
/// Returns error if `to` does not exist.
pub fn transplant_comments(tree: &mut SyntaxTree, from: NodeId, to: NodeId) -> Result<()> {
    let comments = tree.comments(from).to_vec();
    let line = tree.line(from);
    tree.set_comments(to, comments)?;
    tree.set_line(to, line)
}
