// src/transform/rules/assert_equals.rs
//! `assertFalse(a.equals(b))` and `assertTrue(a.equals(b))` to the dedicated
//! equality assertions, which report both values on failure.

use tracing::trace;

use super::junit::{assertion_over_equals, ASSERTIONS};
use crate::analyzer::rules;
use crate::error::Result;
use crate::history::Category;
use crate::transform::{ProcessContext, Processor};
use crate::tree::{factory, Executable, NodeData, NodeId, NodeKind, Role};

pub const ASSERT_FALSE_CATEGORY: Category = Category {
    name: "AssertFalseEquals",
    description: "assertFalse with equals instead of assertNotEquals. \
                  assertNotEquals reports both values when it fails, assertFalse only reports `false`.",
};

pub const ASSERT_TRUE_CATEGORY: Category = Category {
    name: "AssertTrueEquals",
    description: "assertTrue with equals instead of assertEquals. \
                  assertEquals reports expected and actual values when it fails, assertTrue only reports `true`.",
};

/// Rewrites `Assertions.<assertion>(x.equals(y)[, msg])` into
/// `Assertions.<replacement>(x, y[, msg])`.
#[derive(Debug, Clone, Copy)]
pub struct EqualsAssertion {
    id: &'static str,
    assertion: &'static str,
    replacement: &'static str,
    category: Category,
}

impl EqualsAssertion {
    #[must_use]
    pub const fn assert_false() -> Self {
        Self {
            id: "assert-false-equals",
            assertion: "assertFalse",
            replacement: "assertNotEquals",
            category: ASSERT_FALSE_CATEGORY,
        }
    }

    #[must_use]
    pub const fn assert_true() -> Self {
        Self {
            id: "assert-true-equals",
            assertion: "assertTrue",
            replacement: "assertEquals",
            category: ASSERT_TRUE_CATEGORY,
        }
    }

    fn enclosing_method(ctx: &ProcessContext<'_>, node: NodeId) -> String {
        let tree = ctx.tree();
        tree.ancestor_of_kind(node, NodeKind::Method)
            .and_then(|m| match tree.data(m) {
                Some(NodeData::Method { name, .. }) => Some(name.clone()),
                _ => None,
            })
            .unwrap_or_else(|| "<initializer>".to_string())
    }
}

impl Processor for EqualsAssertion {
    fn id(&self) -> &'static str {
        self.id
    }

    fn node_kind(&self) -> NodeKind {
        NodeKind::Invocation
    }

    fn category(&self) -> Category {
        self.category
    }

    fn analyzer_rule(&self) -> Option<&'static str> {
        Some(rules::SIMPLIFIABLE_ASSERTION)
    }

    fn process(&self, ctx: &mut ProcessContext<'_>, node: NodeId) -> Result<()> {
        let Some(equals) = assertion_over_equals(ctx.tree(), node, self.assertion) else {
            trace!(processor = self.id, node = %node, "no match");
            return Ok(());
        };
        let arguments = ctx.tree().children_with_role(node, Role::Argument);
        let method = Self::enclosing_method(ctx, node);

        let expected = ctx.clone_node(equals.receiver)?;
        let actual = ctx.clone_node(equals.argument)?;
        let replacement =
            ctx.create_invocation(Executable::new(ASSERTIONS, self.replacement), &[expected, actual])?;
        factory::transplant_comments(ctx.tree_mut(), node, replacement)?;
        ctx.tree_mut().replace(node, replacement)?;

        // the failure message, if any, moves along
        if let [_, message] = arguments.as_slice() {
            let message = ctx.clone_node(*message)?;
            ctx.tree_mut().attach(replacement, Role::Argument, message)?;
        }

        ctx.remove_import_if_unused(&format!("{ASSERTIONS}.{}", self.assertion), true)?;
        ctx.add_import(&format!("{ASSERTIONS}.{}", self.replacement), true)?;

        let summary = format!(
            "Replaced {} checking equals with {} in method {method}",
            self.assertion, self.replacement
        );
        ctx.record(replacement, summary, self.category);
        Ok(())
    }
}

#[cfg(test)]
#[path = "assert_equals_test.rs"]
mod tests;
