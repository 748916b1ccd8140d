// src/transform/rules/final_static_method.rs
use super::junit::{is_final_static_method, method_name};
use crate::analyzer::rules;
use crate::error::Result;
use crate::history::Category;
use crate::transform::{ProcessContext, Processor};
use crate::tree::{Modifier, NodeData, NodeId, NodeKind};

pub const CATEGORY: Category = Category {
    name: "FinalStaticMethod",
    description: "A final method is a method that cannot be overridden in a subclass. \
                  Static methods are bound to the class, so they cannot be overridden, only hidden; \
                  `final` on them is redundant.",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct FinalStaticMethod;

impl Processor for FinalStaticMethod {
    fn id(&self) -> &'static str {
        "final-static-method"
    }

    fn node_kind(&self) -> NodeKind {
        NodeKind::Method
    }

    fn category(&self) -> Category {
        CATEGORY
    }

    fn analyzer_rule(&self) -> Option<&'static str> {
        Some(rules::FINAL_STATIC_METHOD)
    }

    fn process(&self, ctx: &mut ProcessContext<'_>, node: NodeId) -> Result<()> {
        if !is_final_static_method(ctx.tree(), node) {
            return Ok(());
        }
        ctx.tree_mut().update(node, |data| {
            if let NodeData::Method { modifiers, .. } = data {
                modifiers.remove(&Modifier::Final);
            }
        })?;
        let summary = format!(
            "Removed final modifier from static method {}",
            method_name(ctx.tree(), node)
        );
        ctx.record(node, summary, CATEGORY);
        Ok(())
    }
}

#[cfg(test)]
#[path = "final_static_method_test.rs"]
mod tests;
