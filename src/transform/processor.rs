// src/transform/processor.rs
use super::context::ProcessContext;
use crate::error::Result;
use crate::history::Category;
use crate::tree::{NodeId, NodeKind};

/// A stateless rewrite rule scoped to one node kind.
///
/// `process` is called once per matching node. If the node does not match the
/// rule's precondition the call must return `Ok(())` without touching the
/// tree. A matching node must not match again once rewritten.
pub trait Processor: Send + Sync {
    /// Stable identifier, used in logs and configuration.
    fn id(&self) -> &'static str;

    /// The only node kind this processor is invoked on.
    fn node_kind(&self) -> NodeKind;

    fn category(&self) -> Category;

    /// Analyzer rule whose findings this processor repairs.
    fn analyzer_rule(&self) -> Option<&'static str> {
        None
    }

    /// Inspects `node` and rewrites it if it matches.
    ///
    /// # Errors
    /// Returns error if a matching rewrite could not be completed; the engine
    /// then discards every edit made during this call.
    fn process(&self, ctx: &mut ProcessContext<'_>, node: NodeId) -> Result<()>;
}
