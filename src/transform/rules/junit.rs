// src/transform/rules/junit.rs
//! Shared JUnit matchers used by rewrites and by smell detection.

use crate::tree::{Modifier, NodeData, NodeId, Role, SyntaxTree};

pub const ASSERTIONS: &str = "org.junit.jupiter.api.Assertions";

pub const JUNIT4_BEFORE_CLASS: &str = "org.junit.BeforeClass";
pub const JUNIT4_BEFORE: &str = "org.junit.Before";
pub const JUNIT4_AFTER: &str = "org.junit.After";
pub const JUNIT4_AFTER_CLASS: &str = "org.junit.AfterClass";
pub const JUNIT4_IGNORE: &str = "org.junit.Ignore";

pub const JUNIT5_BEFORE_ALL: &str = "org.junit.jupiter.api.BeforeAll";
pub const JUNIT5_BEFORE_EACH: &str = "org.junit.jupiter.api.BeforeEach";
pub const JUNIT5_AFTER_EACH: &str = "org.junit.jupiter.api.AfterEach";
pub const JUNIT5_AFTER_ALL: &str = "org.junit.jupiter.api.AfterAll";
pub const JUNIT5_DISABLED: &str = "org.junit.jupiter.api.Disabled";

/// `receiver.equals(argument)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualsCall {
    pub invocation: NodeId,
    pub receiver: NodeId,
    pub argument: NodeId,
}

/// True if `node` calls `Assertions.<name>`.
#[must_use]
pub fn is_junit5_assertion(tree: &SyntaxTree, node: NodeId, name: &str) -> bool {
    matches!(
        tree.data(node),
        Some(NodeData::Invocation { executable }) if executable.is(ASSERTIONS, name)
    )
}

/// Matches `receiver.equals(argument)`.
#[must_use]
pub fn as_equals_call(tree: &SyntaxTree, node: NodeId) -> Option<EqualsCall> {
    let Some(NodeData::Invocation { executable }) = tree.data(node) else {
        return None;
    };
    if executable.name != "equals" {
        return None;
    }
    let receiver = *tree.children_with_role(node, Role::Target).first()?;
    let args = tree.children_with_role(node, Role::Argument);
    let [argument] = args.as_slice() else {
        return None;
    };
    Some(EqualsCall {
        invocation: node,
        receiver,
        argument: *argument,
    })
}

/// Matches `Assertions.<assertion>(x.equals(y)[, message])`.
#[must_use]
pub fn assertion_over_equals(tree: &SyntaxTree, node: NodeId, assertion: &str) -> Option<EqualsCall> {
    if !is_junit5_assertion(tree, node, assertion) {
        return None;
    }
    let args = tree.children_with_role(node, Role::Argument);
    if !(1..=2).contains(&args.len()) {
        return None;
    }
    as_equals_call(tree, args[0])
}

/// The annotation of qualified type `type_name` on `method`, if present.
#[must_use]
pub fn find_annotation(tree: &SyntaxTree, method: NodeId, type_name: &str) -> Option<NodeId> {
    tree.children_with_role(method, Role::Annotation)
        .into_iter()
        .find(|a| matches!(tree.data(*a), Some(NodeData::Annotation { type_name: t }) if t == type_name))
}

/// True if `node` is a method declared both `static` and `final`.
#[must_use]
pub fn is_final_static_method(tree: &SyntaxTree, node: NodeId) -> bool {
    matches!(
        tree.data(node),
        Some(NodeData::Method { modifiers, .. })
            if modifiers.contains(&Modifier::Static) && modifiers.contains(&Modifier::Final)
    )
}

/// Name of the method `node`, or empty.
#[must_use]
pub fn method_name(tree: &SyntaxTree, node: NodeId) -> &str {
    match tree.data(node) {
        Some(NodeData::Method { name, .. }) => name,
        _ => "",
    }
}
