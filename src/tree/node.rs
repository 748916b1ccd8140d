// src/tree/node.rs
//! Node payloads of the syntax tree.
//!
//! Names carried by nodes are already resolved by the front end that produced
//! the tree: invocations know their declaring type, annotations and types know
//! their qualified names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Index of a node inside one [`super::SyntaxTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    CompilationUnit,
    Import,
    Type,
    Method,
    Annotation,
    Invocation,
    Literal,
    VariableRead,
    Block,
}

/// Position of a node inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The compilation unit, or a node that is not attached yet.
    Root,
    Import,
    Member,
    Annotation,
    Body,
    Statement,
    Target,
    Argument,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
}

/// Resolved reference to an invoked method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Executable {
    #[serde(default)]
    pub declaring_type: Option<String>,
    pub name: String,
}

impl Executable {
    pub fn new(declaring_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            declaring_type: Some(declaring_type.into()),
            name: name.into(),
        }
    }

    /// An executable whose declaring type the front end could not resolve.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            declaring_type: None,
            name: name.into(),
        }
    }

    /// `pkg.Type.name`, or the bare name when unresolved.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.declaring_type {
            Some(owner) => format!("{owner}.{}", self.name),
            None => self.name.clone(),
        }
    }

    #[must_use]
    pub fn is(&self, declaring_type: &str, name: &str) -> bool {
        self.name == name && self.declaring_type.as_deref() == Some(declaring_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeData {
    CompilationUnit {
        path: PathBuf,
    },
    Import {
        symbol: String,
        #[serde(default)]
        is_static: bool,
    },
    Type {
        qualified_name: String,
    },
    Method {
        name: String,
        #[serde(default)]
        modifiers: BTreeSet<Modifier>,
    },
    Annotation {
        type_name: String,
    },
    Invocation {
        executable: Executable,
    },
    Literal {
        text: String,
    },
    VariableRead {
        name: String,
    },
    Block,
}

impl NodeData {
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::CompilationUnit { .. } => NodeKind::CompilationUnit,
            Self::Import { .. } => NodeKind::Import,
            Self::Type { .. } => NodeKind::Type,
            Self::Method { .. } => NodeKind::Method,
            Self::Annotation { .. } => NodeKind::Annotation,
            Self::Invocation { .. } => NodeKind::Invocation,
            Self::Literal { .. } => NodeKind::Literal,
            Self::VariableRead { .. } => NodeKind::VariableRead,
            Self::Block => NodeKind::Block,
        }
    }

    pub fn method(name: impl Into<String>, modifiers: &[Modifier]) -> Self {
        Self::Method {
            name: name.into(),
            modifiers: modifiers.iter().copied().collect(),
        }
    }

    pub fn annotation(type_name: impl Into<String>) -> Self {
        Self::Annotation {
            type_name: type_name.into(),
        }
    }

    #[must_use]
    pub fn invocation(executable: Executable) -> Self {
        Self::Invocation { executable }
    }

    pub fn import(symbol: impl Into<String>, is_static: bool) -> Self {
        Self::Import {
            symbol: symbol.into(),
            is_static,
        }
    }

    pub fn type_decl(qualified_name: impl Into<String>) -> Self {
        Self::Type {
            qualified_name: qualified_name.into(),
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal { text: text.into() }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::VariableRead { name: name.into() }
    }

    /// The identifying name a human would use for this node.
    #[must_use]
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            Self::Import { symbol, .. } => Some(last_segment(symbol)),
            Self::Type { qualified_name } => Some(last_segment(qualified_name)),
            Self::Method { name, .. } | Self::VariableRead { name } => Some(name),
            Self::Annotation { type_name } => Some(last_segment(type_name)),
            Self::Invocation { executable } => Some(&executable.name),
            Self::CompilationUnit { .. } | Self::Literal { .. } | Self::Block => None,
        }
    }
}

/// One arena slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub(crate) data: NodeData,
    pub(crate) role: Role,
    #[serde(default)]
    pub(crate) parent: Option<NodeId>,
    #[serde(default)]
    pub(crate) children: Vec<NodeId>,
    #[serde(default)]
    pub(crate) comments: Vec<String>,
    #[serde(default)]
    pub(crate) line: Option<u32>,
}

impl Node {
    pub(crate) fn detached(data: NodeData) -> Self {
        Self {
            data,
            role: Role::Root,
            parent: None,
            children: Vec::new(),
            comments: Vec::new(),
            line: None,
        }
    }

    #[must_use]
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    #[must_use]
    pub fn line(&self) -> Option<u32> {
        self.line
    }
}

/// Last dot-separated segment of a qualified name.
#[must_use]
pub fn last_segment(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Everything before the last dot, if any.
#[must_use]
pub fn owner_of(qualified: &str) -> Option<&str> {
    qualified.rsplit_once('.').map(|(owner, _)| owner)
}
