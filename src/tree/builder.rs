// src/tree/builder.rs
//! Fluent construction of compilation units, for front ends and tests.

use super::{Executable, Modifier, NodeData, NodeId, Role, SyntaxTree};
use crate::error::Result;

/// Builds one compilation unit holding one top-level type.
#[derive(Debug, Clone)]
pub struct UnitBuilder {
    tree: SyntaxTree,
    ty: NodeId,
}

impl UnitBuilder {
    /// # Errors
    /// Returns error if the type cannot be attached.
    pub fn new(path: &str, qualified_type: &str) -> Result<Self> {
        let mut tree = SyntaxTree::new(path);
        let unit = tree.root();
        let ty = tree.append(unit, Role::Member, NodeData::type_decl(qualified_type))?;
        Ok(Self { tree, ty })
    }

    #[must_use]
    pub fn type_node(&self) -> NodeId {
        self.ty
    }

    #[must_use]
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    #[must_use]
    pub fn build(self) -> SyntaxTree {
        self.tree
    }

    /// Adds an import before the type declaration.
    ///
    /// # Errors
    /// Returns error if the import cannot be attached.
    pub fn import(&mut self, symbol: &str, is_static: bool) -> Result<NodeId> {
        let unit = self.tree.root();
        let index = self.tree.children_with_role(unit, Role::Import).len();
        let import = self.tree.add(NodeData::import(symbol, is_static));
        self.tree.insert(unit, index, Role::Import, import)?;
        Ok(import)
    }

    /// Adds a method with the given annotations and an empty body.
    ///
    /// # Errors
    /// Returns error if a node cannot be attached.
    pub fn method(&mut self, name: &str, modifiers: &[Modifier], annotations: &[&str]) -> Result<NodeId> {
        let method = self
            .tree
            .append(self.ty, Role::Member, NodeData::method(name, modifiers))?;
        for annotation in annotations {
            self.tree
                .append(method, Role::Annotation, NodeData::annotation(*annotation))?;
        }
        self.tree.append(method, Role::Body, NodeData::Block)?;
        Ok(method)
    }

    /// Body block of `method`.
    ///
    /// # Errors
    /// Returns error if `method` has no body.
    pub fn body(&self, method: NodeId) -> Result<NodeId> {
        self.tree
            .children_with_role(method, Role::Body)
            .first()
            .copied()
            .ok_or_else(|| crate::error::SmellfixError::Other(format!("{method} has no body")))
    }

    /// Appends `owner.name(args...)` as a statement of `method`'s body.
    /// Arguments must be detached nodes.
    ///
    /// # Errors
    /// Returns error if a node cannot be attached.
    pub fn call(&mut self, method: NodeId, executable: Executable, args: &[NodeId]) -> Result<NodeId> {
        let body = self.body(method)?;
        let call = self.tree.append(body, Role::Statement, NodeData::invocation(executable))?;
        for arg in args {
            self.tree.attach(call, Role::Argument, *arg)?;
        }
        Ok(call)
    }

    /// Creates a detached `receiver.equals(argument)` over two variables.
    ///
    /// # Errors
    /// Returns error if a node cannot be attached.
    pub fn equals(&mut self, receiver: &str, argument: &str) -> Result<NodeId> {
        let call = self
            .tree
            .add(NodeData::invocation(Executable::new("java.lang.Object", "equals")));
        self.tree
            .append(call, Role::Target, NodeData::variable(receiver))?;
        self.tree
            .append(call, Role::Argument, NodeData::variable(argument))?;
        Ok(call)
    }

    /// Creates a detached literal.
    pub fn literal(&mut self, text: &str) -> NodeId {
        self.tree.add(NodeData::literal(text))
    }

    /// Creates a detached variable read.
    pub fn variable(&mut self, name: &str) -> NodeId {
        self.tree.add(NodeData::variable(name))
    }

    /// # Errors
    /// Returns error if `id` does not exist.
    pub fn comment(&mut self, id: NodeId, text: &str) -> Result<()> {
        let mut comments = self.tree.comments(id).to_vec();
        comments.push(text.to_string());
        self.tree.set_comments(id, comments)
    }

    /// # Errors
    /// Returns error if `id` does not exist.
    pub fn at_line(&mut self, id: NodeId, line: u32) -> Result<()> {
        self.tree.set_line(id, Some(line))
    }
}
