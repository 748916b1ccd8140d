// src/transform/engine.rs
//! The driver: traversal, processor dispatch, rollback and ledger.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::context::ProcessContext;
use super::processor::Processor;
use super::target::Target;
use crate::analyzer::AnalyzerFinding;
use crate::error::SmellfixError;
use crate::history::{Change, Ledger};
use crate::tree::{Model, NodeId, SyntaxTree, TreeStore};

/// Result of one project job.
#[derive(Debug)]
pub enum JobOutcome {
    Completed(Ledger),
    /// The job aborted. `persisted` holds the changes of units saved before
    /// the failure; they are on disk and count as applied. `partial` holds
    /// everything recorded, saved or not, for diagnostics.
    Failed {
        error: SmellfixError,
        persisted: Ledger,
        partial: Ledger,
    },
}

impl JobOutcome {
    /// A job that failed before anything was transformed.
    #[must_use]
    pub fn failed(error: SmellfixError) -> Self {
        Self::Failed {
            error,
            persisted: Ledger::new(),
            partial: Ledger::new(),
        }
    }

    /// Changes that were applied and persisted.
    #[must_use]
    pub fn changes(&self) -> &[Change] {
        self.ledger().changes()
    }

    #[must_use]
    pub fn applied(&self) -> usize {
        self.changes().len()
    }

    /// Ledger of the persisted changes.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        match self {
            Self::Completed(ledger) => ledger,
            Self::Failed { persisted, .. } => persisted,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&SmellfixError> {
        match self {
            Self::Completed(_) => None,
            Self::Failed { error, .. } => Some(error),
        }
    }

    #[must_use]
    pub fn partial(&self) -> Option<&Ledger> {
        match self {
            Self::Completed(_) => None,
            Self::Failed { partial, .. } => Some(partial),
        }
    }

    /// Recorded changes that never reached the store.
    #[must_use]
    pub fn unsaved(&self) -> usize {
        self.partial().map_or(0, |p| p.len() - self.applied())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

enum Selection<'a> {
    Skip,
    Run(Option<&'a AnalyzerFinding>),
}

/// Applies registered processors to every node of a model.
pub struct TransformationEngine {
    processors: Vec<Box<dyn Processor>>,
    targets: Option<Vec<Target>>,
}

impl TransformationEngine {
    #[must_use]
    pub fn new(processors: Vec<Box<dyn Processor>>) -> Self {
        Self {
            processors,
            targets: None,
        }
    }

    /// Restricts every processor to the places named by `targets`.
    #[must_use]
    pub fn with_targets(mut self, targets: Vec<Target>) -> Self {
        self.targets = Some(targets);
        self
    }

    #[must_use]
    pub fn processors(&self) -> &[Box<dyn Processor>] {
        &self.processors
    }

    /// Loads `roots`, rewrites every unit and saves the ones that changed.
    pub fn run(&self, store: &dyn TreeStore, roots: &[PathBuf]) -> JobOutcome {
        match store.load(roots) {
            Ok(model) => self.run_loaded(store, model),
            Err(error) => {
                warn!(%error, "could not load source roots");
                JobOutcome::failed(error)
            }
        }
    }

    /// Rewrites an already loaded model and saves the units that changed.
    pub fn run_loaded(&self, store: &dyn TreeStore, mut model: Model) -> JobOutcome {
        info!(units = model.len(), processors = self.processors.len(), "transforming");

        let mut ledger = Ledger::new();
        let mut persisted = Ledger::new();
        for unit in model.units_mut() {
            let before = ledger.len();
            self.apply_to_tree(&mut unit.tree, &mut ledger);
            if ledger.len() == before {
                continue;
            }
            if let Err(error) = store.save(unit) {
                warn!(
                    %error,
                    unit = %unit.origin.display(),
                    saved = persisted.len(),
                    "could not save unit"
                );
                return JobOutcome::Failed {
                    error,
                    persisted,
                    partial: ledger,
                };
            }
            persisted.extend(ledger.changes()[before..].iter().cloned());
        }
        info!(changes = ledger.len(), "transformation complete");
        JobOutcome::Completed(ledger)
    }

    /// Rewrites every unit of `model` in memory.
    pub fn apply(&self, model: &mut Model) -> Ledger {
        let mut ledger = Ledger::new();
        for unit in model.units_mut() {
            self.apply_to_tree(&mut unit.tree, &mut ledger);
        }
        ledger
    }

    /// One pass over `tree`.
    ///
    /// The node order is fixed before the pass starts: nodes created during
    /// the pass are not visited, and nodes detached by an earlier rewrite are
    /// skipped.
    pub fn apply_to_tree(&self, tree: &mut SyntaxTree, ledger: &mut Ledger) {
        let order = tree.descendants(tree.root());
        debug!(file = %tree.path().display(), nodes = order.len(), "visiting unit");
        for node in order {
            for processor in &self.processors {
                if !tree.is_attached(node) {
                    break;
                }
                if tree.kind(node) != Some(processor.node_kind()) {
                    continue;
                }
                let finding = match self.select(processor.as_ref(), tree.path(), tree.line(node)) {
                    Selection::Skip => continue,
                    Selection::Run(finding) => finding,
                };
                Self::invoke(processor.as_ref(), tree, node, finding, ledger);
            }
        }
    }

    fn select(&self, processor: &dyn Processor, file: &Path, line: Option<u32>) -> Selection<'_> {
        let Some(targets) = &self.targets else {
            return Selection::Run(None);
        };
        let Some(rule) = processor.analyzer_rule() else {
            return Selection::Skip;
        };
        targets
            .iter()
            .find(|t| t.matches(rule, file, line))
            .map_or(Selection::Skip, |t| Selection::Run(t.finding.as_ref()))
    }

    fn invoke(
        processor: &dyn Processor,
        tree: &mut SyntaxTree,
        node: NodeId,
        finding: Option<&AnalyzerFinding>,
        ledger: &mut Ledger,
    ) {
        tree.begin();
        let mut ctx = ProcessContext::new(tree, finding);
        let result = processor.process(&mut ctx, node);
        let changes = ctx.into_changes();
        match result {
            Ok(()) => {
                tree.commit();
                ledger.extend(changes);
            }
            Err(error) => {
                tree.rollback();
                warn!(
                    processor = processor.id(),
                    category = processor.category().name,
                    node = %node,
                    file = %tree.path().display(),
                    line = ?tree.line(node),
                    %error,
                    "rewrite failed, node left unchanged"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
