// src/transform/rules/junit4_annotations.rs
//! JUnit 4 lifecycle annotations to their JUnit 5 counterparts.

use tracing::{trace, warn};

use super::junit::{
    find_annotation, method_name, JUNIT4_AFTER, JUNIT4_AFTER_CLASS, JUNIT4_BEFORE,
    JUNIT4_BEFORE_CLASS, JUNIT4_IGNORE, JUNIT5_AFTER_ALL, JUNIT5_AFTER_EACH, JUNIT5_BEFORE_ALL,
    JUNIT5_BEFORE_EACH, JUNIT5_DISABLED,
};
use crate::analyzer::rules;
use crate::error::{Result, SmellfixError};
use crate::history::Category;
use crate::transform::{ProcessContext, Processor};
use crate::tree::{factory, last_segment, NodeId, NodeKind};

pub const CATEGORY: Category = Category {
    name: "Junit4Annotations",
    description: "JUnit 4 lifecycle annotations are replaced by their JUnit 5 equivalents. \
                  Mixing both generations in one test class silently disables the JUnit 4 ones \
                  under the JUnit Platform.",
};

/// Each pair is checked on its own; a method carries at most one of each.
const REPLACEMENTS: &[(&str, &str)] = &[
    (JUNIT4_BEFORE_CLASS, JUNIT5_BEFORE_ALL),
    (JUNIT4_BEFORE, JUNIT5_BEFORE_EACH),
    (JUNIT4_AFTER, JUNIT5_AFTER_EACH),
    (JUNIT4_AFTER_CLASS, JUNIT5_AFTER_ALL),
    (JUNIT4_IGNORE, JUNIT5_DISABLED),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Junit4Annotations;

impl Junit4Annotations {
    fn replace(
        ctx: &mut ProcessContext<'_>,
        method: NodeId,
        junit4: &str,
        junit5: &str,
    ) -> Result<()> {
        let Some(old) = find_annotation(ctx.tree(), method, junit4) else {
            return Ok(());
        };

        if find_annotation(ctx.tree(), method, junit5).is_some() {
            ctx.tree_mut().detach(old)?;
        } else {
            let new = ctx.create_annotation(junit5);
            factory::transplant_comments(ctx.tree_mut(), old, new)?;
            ctx.tree_mut().replace(old, new)?;
        }

        ctx.add_import(junit5, false)?;
        ctx.remove_import_if_unused(junit4, false)?;

        let summary = format!(
            "Replaced @{} annotation with @{} from method {}",
            last_segment(junit4),
            last_segment(junit5),
            method_name(ctx.tree(), method)
        );
        ctx.record(method, summary, CATEGORY);
        Ok(())
    }
}

impl Processor for Junit4Annotations {
    fn id(&self) -> &'static str {
        "junit4-annotations"
    }

    fn node_kind(&self) -> NodeKind {
        NodeKind::Method
    }

    fn category(&self) -> Category {
        CATEGORY
    }

    fn analyzer_rule(&self) -> Option<&'static str> {
        Some(rules::JUNIT5_CONVERTER)
    }

    /// A failing check is undone on its own and the remaining checks still
    /// run. The call fails only if checks failed and none applied.
    fn process(&self, ctx: &mut ProcessContext<'_>, node: NodeId) -> Result<()> {
        let mut failures = Vec::new();
        for (junit4, junit5) in REPLACEMENTS {
            if let Err(error) = ctx.attempt(|ctx| Self::replace(ctx, node, junit4, junit5)) {
                warn!(annotation = junit4, %error, "annotation check failed");
                failures.push(format!("{}: {error}", last_segment(junit4)));
            }
        }
        trace!(method = method_name(ctx.tree(), node), "junit4 annotations checked");
        if failures.is_empty() || ctx.recorded() > 0 {
            return Ok(());
        }
        Err(SmellfixError::rewrite(self.id(), node, failures.join("; ")))
    }
}

#[cfg(test)]
#[path = "junit4_annotations_test.rs"]
mod tests;
