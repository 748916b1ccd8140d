// src/tree/store.rs
//! Loading and saving syntax trees.
//!
//! Parsing source text is the front end's job. The engine only sees trees
//! through [`TreeStore`]; the bundled [`JsonTreeStore`] reads the JSON
//! snapshots a front end writes next to the sources.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::SyntaxTree;
use crate::error::{IoContext, Result, SmellfixError};

/// File suffix of tree snapshots.
pub const SNAPSHOT_SUFFIX: &str = ".tree.json";

/// One loaded compilation unit and where it came from.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub origin: PathBuf,
    pub tree: SyntaxTree,
}

/// Every compilation unit of one project job.
#[derive(Debug, Clone, Default)]
pub struct Model {
    units: Vec<SourceUnit>,
}

impl Model {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, origin: impl Into<PathBuf>, tree: SyntaxTree) {
        self.units.push(SourceUnit {
            origin: origin.into(),
            tree,
        });
    }

    #[must_use]
    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    pub fn units_mut(&mut self) -> &mut [SourceUnit] {
        &mut self.units
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl From<Vec<SyntaxTree>> for Model {
    fn from(trees: Vec<SyntaxTree>) -> Self {
        let units = trees
            .into_iter()
            .map(|tree| SourceUnit {
                origin: tree.path().to_path_buf(),
                tree,
            })
            .collect();
        Self { units }
    }
}

pub trait TreeStore: Send + Sync {
    /// Loads every compilation unit below `roots`.
    ///
    /// # Errors
    /// Returns error if a root is unreadable or a tree is malformed.
    fn load(&self, roots: &[PathBuf]) -> Result<Model>;

    /// Writes `unit` back to its origin.
    ///
    /// # Errors
    /// Returns error if the tree cannot be persisted.
    fn save(&self, unit: &SourceUnit) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTreeStore;

impl JsonTreeStore {
    /// Reads one snapshot file.
    ///
    /// # Errors
    /// Returns error if the file is unreadable or not a valid tree.
    pub fn read(path: &Path) -> Result<SyntaxTree> {
        let content = fs::read_to_string(path).with_path(path)?;
        let tree: SyntaxTree = serde_json::from_str(&content).map_err(|e| SmellfixError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        tree.validate().map_err(|reason| SmellfixError::Load {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(tree)
    }
}

impl TreeStore for JsonTreeStore {
    fn load(&self, roots: &[PathBuf]) -> Result<Model> {
        let mut model = Model::new();
        for root in roots {
            if !root.is_dir() {
                return Err(SmellfixError::Load {
                    path: root.clone(),
                    reason: "source root is not a directory".into(),
                });
            }
            let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
            for entry in walker {
                let entry = entry?;
                let is_snapshot = entry.file_type().is_file()
                    && entry
                        .file_name()
                        .to_string_lossy()
                        .ends_with(SNAPSHOT_SUFFIX);
                if is_snapshot {
                    let tree = Self::read(entry.path())?;
                    model.push(entry.path(), tree);
                }
            }
            debug!(root = %root.display(), units = model.len(), "loaded source root");
        }
        Ok(model)
    }

    fn save(&self, unit: &SourceUnit) -> Result<()> {
        let json = serde_json::to_string_pretty(&unit.tree)?;
        fs::write(&unit.origin, json).with_path(&unit.origin)
    }
}

/// Delegates loading and discards saves, for dry runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnlyStore<S>(pub S);

impl<S: TreeStore> TreeStore for ReadOnlyStore<S> {
    fn load(&self, roots: &[PathBuf]) -> Result<Model> {
        self.0.load(roots)
    }

    fn save(&self, unit: &SourceUnit) -> Result<()> {
        debug!(unit = %unit.origin.display(), "dry run, not saving");
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
