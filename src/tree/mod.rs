// src/tree/mod.rs
//! Arena syntax tree the transformation engine walks and edits.
//!
//! One [`SyntaxTree`] holds exactly one compilation unit; node 0 is always the
//! unit. Nodes are never freed: detaching a node only unlinks it, so a
//! [`NodeId`] handed out earlier stays valid for the lifetime of the tree and
//! callers can ask [`SyntaxTree::is_attached`] whether it is still reachable.
//!
//! Every mutation goes through a journal while a transaction is open
//! ([`SyntaxTree::begin`]), which lets the engine drop a half-applied rewrite
//! with [`SyntaxTree::rollback`]. Savepoints ([`SyntaxTree::savepoint`])
//! undo a part of the open transaction and leave the rest in place.

pub mod builder;
pub mod factory;
pub mod node;
pub mod store;

pub use self::builder::UnitBuilder;
pub use self::node::{
    last_segment, owner_of, Executable, Modifier, Node, NodeData, NodeId, NodeKind, Role,
};
pub use self::store::{JsonTreeStore, Model, ReadOnlyStore, SourceUnit, TreeStore, SNAPSHOT_SUFFIX};

use crate::error::{Result, SmellfixError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ROOT: NodeId = NodeId(0);

/// A position in the journal to roll back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Savepoint {
    arena_len: usize,
    saved: usize,
    opened: bool,
}

#[derive(Debug, Clone, Default)]
struct Journal {
    arena_len: usize,
    saved: Vec<(NodeId, Node)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    #[serde(skip)]
    journal: Option<Journal>,
}

impl SyntaxTree {
    /// Creates a tree holding an empty compilation unit for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            nodes: vec![Node::detached(NodeData::CompilationUnit { path: path.into() })],
            journal: None,
        }
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        ROOT
    }

    /// Source path of the compilation unit.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self.data(ROOT) {
            Some(NodeData::CompilationUnit { path }) => path,
            _ => Path::new(""),
        }
    }

    /// Number of arena slots, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    #[must_use]
    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.get(id).map(Node::data)
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(Node::kind)
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], Node::children)
    }

    /// Children of `id` attached under `role`, in order.
    #[must_use]
    pub fn children_with_role(&self, id: NodeId, role: Role) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.get(*c).is_some_and(|n| n.role == role))
            .collect()
    }

    #[must_use]
    pub fn comments(&self, id: NodeId) -> &[String] {
        self.get(id).map_or(&[], Node::comments)
    }

    #[must_use]
    pub fn line(&self, id: NodeId) -> Option<u32> {
        self.get(id).and_then(Node::line)
    }

    /// Closest strict ancestor of `id` with the given kind.
    #[must_use]
    pub fn ancestor_of_kind(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if self.kind(p) == Some(kind) {
                return Some(p);
            }
            current = self.parent(p);
        }
        None
    }

    /// The type declaration `id` belongs to: itself if it is one, else the
    /// closest enclosing one.
    #[must_use]
    pub fn enclosing_type(&self, id: NodeId) -> Option<NodeId> {
        if self.kind(id) == Some(NodeKind::Type) {
            return Some(id);
        }
        self.ancestor_of_kind(id, NodeKind::Type)
    }

    /// The outermost type declaration enclosing `id`.
    #[must_use]
    pub fn top_level_type(&self, id: NodeId) -> Option<NodeId> {
        let mut top = self.enclosing_type(id)?;
        while let Some(outer) = self.ancestor_of_kind(top, NodeKind::Type) {
            top = outer;
        }
        Some(top)
    }

    /// `id` and every node below it, pre-order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.get(id).is_none() {
            return out;
        }
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Attached nodes of the given kind below `id`, pre-order.
    #[must_use]
    pub fn descendants_of_kind(&self, id: NodeId, kind: NodeKind) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|n| self.kind(*n) == Some(kind))
            .collect()
    }

    /// True if `id` is reachable from the compilation unit.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == ROOT {
                return true;
            }
            match self.parent(current) {
                Some(p) => current = p,
                None => return false,
            }
        }
    }

    // --- mutation ---

    /// Allocates a detached node.
    pub fn add(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::detached(data));
        id
    }

    /// Allocates a node and appends it under `parent`.
    ///
    /// # Errors
    /// Returns error if `parent` does not exist.
    pub fn append(&mut self, parent: NodeId, role: Role, data: NodeData) -> Result<NodeId> {
        self.require(parent)?;
        let child = self.add(data);
        self.attach(parent, role, child)?;
        Ok(child)
    }

    /// Appends the detached node `child` as last child of `parent`.
    ///
    /// # Errors
    /// Returns error if either node is missing or `child` is still attached.
    pub fn attach(&mut self, parent: NodeId, role: Role, child: NodeId) -> Result<()> {
        let index = self.children(parent).len();
        self.insert(parent, index, role, child)
    }

    /// Inserts the detached node `child` at `index` among `parent`'s children.
    ///
    /// # Errors
    /// Returns error if either node is missing, `child` still has a parent,
    /// or `child` is an ancestor of `parent`.
    pub fn insert(&mut self, parent: NodeId, index: usize, role: Role, child: NodeId) -> Result<()> {
        self.require(parent)?;
        self.require(child)?;
        if child == ROOT || self.parent(child).is_some() {
            return Err(SmellfixError::Other(format!(
                "node {child} is already attached"
            )));
        }
        if self.descendants(child).contains(&parent) {
            return Err(SmellfixError::Other(format!(
                "attaching {child} under {parent} would create a cycle"
            )));
        }
        self.touch(parent);
        self.touch(child);
        let slot = &mut self.nodes[parent.0].children;
        let index = index.min(slot.len());
        slot.insert(index, child);
        let node = &mut self.nodes[child.0];
        node.parent = Some(parent);
        node.role = role;
        Ok(())
    }

    /// Unlinks `id` from its parent. The subtree stays in the arena.
    ///
    /// # Errors
    /// Returns error if `id` is missing or is the compilation unit.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        self.require(id)?;
        let Some(parent) = self.parent(id) else {
            return if id == ROOT {
                Err(SmellfixError::Other("cannot detach the compilation unit".into()))
            } else {
                Ok(())
            };
        };
        self.touch(parent);
        self.touch(id);
        self.nodes[parent.0].children.retain(|c| *c != id);
        let node = &mut self.nodes[id.0];
        node.parent = None;
        node.role = Role::Root;
        Ok(())
    }

    /// Puts the detached node `replacement` where `old` was, with `old`'s role.
    ///
    /// # Errors
    /// Returns error if `old` is not attached or `replacement` is.
    pub fn replace(&mut self, old: NodeId, replacement: NodeId) -> Result<()> {
        self.require(old)?;
        self.require(replacement)?;
        let Some(parent) = self.parent(old) else {
            return Err(SmellfixError::Other(format!("node {old} has no parent")));
        };
        if self.parent(replacement).is_some() {
            return Err(SmellfixError::Other(format!(
                "replacement {replacement} is already attached"
            )));
        }
        let role = self.nodes[old.0].role;
        let index = self
            .children(parent)
            .iter()
            .position(|c| *c == old)
            .unwrap_or(0);
        self.detach(old)?;
        self.insert(parent, index, role, replacement)
    }

    /// Deep-copies the subtree under `id` into a new detached subtree.
    ///
    /// # Errors
    /// Returns error if `id` does not exist.
    pub fn clone_subtree(&mut self, id: NodeId) -> Result<NodeId> {
        let source = self.get(id).ok_or(SmellfixError::UnknownNode(id))?;
        let data = source.data.clone();
        let comments = source.comments.clone();
        let line = source.line;
        let children: Vec<(NodeId, Role)> = source
            .children
            .iter()
            .map(|c| (*c, self.nodes[c.0].role))
            .collect();

        let copy = self.add(data);
        self.nodes[copy.0].comments = comments;
        self.nodes[copy.0].line = line;
        for (child, role) in children {
            let child_copy = self.clone_subtree(child)?;
            self.attach(copy, role, child_copy)?;
        }
        Ok(copy)
    }

    /// Replaces the comments attached to `id`.
    ///
    /// # Errors
    /// Returns error if `id` does not exist.
    pub fn set_comments(&mut self, id: NodeId, comments: Vec<String>) -> Result<()> {
        self.require(id)?;
        self.touch(id);
        self.nodes[id.0].comments = comments;
        Ok(())
    }

    /// # Errors
    /// Returns error if `id` does not exist.
    pub fn set_line(&mut self, id: NodeId, line: Option<u32>) -> Result<()> {
        self.require(id)?;
        self.touch(id);
        self.nodes[id.0].line = line;
        Ok(())
    }

    /// Edits the payload of `id` in place.
    ///
    /// # Errors
    /// Returns error if `id` does not exist.
    pub fn update<F>(&mut self, id: NodeId, edit: F) -> Result<()>
    where
        F: FnOnce(&mut NodeData),
    {
        self.require(id)?;
        self.touch(id);
        edit(&mut self.nodes[id.0].data);
        Ok(())
    }

    // --- transactions ---

    /// Opens a transaction. Nested calls join the open one.
    pub fn begin(&mut self) {
        if self.journal.is_none() {
            self.journal = Some(Journal {
                arena_len: self.nodes.len(),
                saved: Vec::new(),
            });
        }
    }

    /// Keeps every mutation made since [`Self::begin`].
    pub fn commit(&mut self) {
        self.journal = None;
    }

    /// Restores the tree to its state at [`Self::begin`].
    pub fn rollback(&mut self) {
        let Some(journal) = self.journal.take() else {
            return;
        };
        for (id, node) in journal.saved.into_iter().rev() {
            if id.0 < journal.arena_len {
                self.nodes[id.0] = node;
            }
        }
        self.nodes.truncate(journal.arena_len);
    }

    /// Marks the current state, opening a transaction if none is open.
    pub fn savepoint(&mut self) -> Savepoint {
        let opened = !self.in_transaction();
        self.begin();
        Savepoint {
            arena_len: self.nodes.len(),
            saved: self.journal.as_ref().map_or(0, |j| j.saved.len()),
            opened,
        }
    }

    /// Keeps the mutations made since `savepoint`. Commits the transaction
    /// if the savepoint opened it.
    pub fn release(&mut self, savepoint: Savepoint) {
        if savepoint.opened {
            self.commit();
        }
    }

    /// Undoes the mutations made since `savepoint`; earlier ones stay.
    pub fn rollback_to(&mut self, savepoint: Savepoint) {
        let Self { nodes, journal } = self;
        if let Some(journal) = journal.as_mut() {
            let undo = journal.saved.split_off(savepoint.saved.min(journal.saved.len()));
            for (id, node) in undo.into_iter().rev() {
                if id.0 < savepoint.arena_len {
                    nodes[id.0] = node;
                }
            }
        }
        nodes.truncate(savepoint.arena_len);
        if savepoint.opened {
            self.journal = None;
        }
    }

    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.journal.is_some()
    }

    /// Checks arena links after deserialization.
    ///
    /// # Errors
    /// Returns a description of the first inconsistency found.
    pub fn validate(&self) -> std::result::Result<(), String> {
        match self.nodes.first() {
            Some(n) if n.kind() == NodeKind::CompilationUnit && n.parent.is_none() => {}
            _ => return Err("node #0 must be a compilation unit without parent".into()),
        }
        for (index, node) in self.nodes.iter().enumerate() {
            let id = NodeId(index);
            for child in &node.children {
                match self.get(*child) {
                    Some(c) if c.parent == Some(id) => {}
                    Some(_) => return Err(format!("{child} does not point back to parent {id}")),
                    None => return Err(format!("{id} references missing child {child}")),
                }
            }
            if let Some(parent) = node.parent {
                let linked = self
                    .get(parent)
                    .is_some_and(|p| p.children.contains(&id));
                if !linked {
                    return Err(format!("{id} is not listed among the children of {parent}"));
                }
            }
        }
        Ok(())
    }

    fn require(&self, id: NodeId) -> Result<()> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(SmellfixError::UnknownNode(id))
        }
    }

    fn touch(&mut self, id: NodeId) {
        if let Some(journal) = self.journal.as_mut() {
            if let Some(node) = self.nodes.get(id.0) {
                journal.saved.push((id, node.clone()));
            }
        }
    }
}

impl PartialEq for SyntaxTree {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tests;
