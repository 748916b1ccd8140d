// src/reporting/smells.rs
use super::path_markdown;
use crate::smells::{
    AssertFalseEquals, AssertTrueEquals, BadSmell, BadSmellVisitor, FinalStaticMethod, NodeRef,
};

/// Renders each smell as a markdown list entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownSmellPrinter;

impl MarkdownSmellPrinter {
    /// Heading plus one entry per smell.
    #[must_use]
    pub fn print_all(smells: &[BadSmell]) -> String {
        let mut out = format!("# Bad smells\nI found {} bad smells:\n", smells.len());
        let mut printer = Self;
        for smell in smells {
            out.push_str(&smell.accept(&mut printer));
        }
        out
    }

    fn entry(name: &str, description: &str, affected: &str, node: &NodeRef) -> String {
        let location = match node.line {
            Some(line) => format!("{} line {line}", path_markdown(&node.file)),
            None => path_markdown(&node.file),
        };
        format!("* **{name}** in `{affected}` ({location})\n  {description}\n")
    }
}

impl BadSmellVisitor for MarkdownSmellPrinter {
    type Output = String;

    fn visit_final_static_method(&mut self, smell: &FinalStaticMethod) -> String {
        Self::entry(
            smell.name(),
            smell.description(),
            &smell.affected_type.qualified_name,
            &smell.node,
        )
    }

    fn visit_assert_false_equals(&mut self, smell: &AssertFalseEquals) -> String {
        Self::entry(
            smell.name(),
            smell.description(),
            &smell.affected_type.qualified_name,
            &smell.node,
        )
    }

    fn visit_assert_true_equals(&mut self, smell: &AssertTrueEquals) -> String {
        Self::entry(
            smell.name(),
            smell.description(),
            &smell.affected_type.qualified_name,
            &smell.node,
        )
    }
}
