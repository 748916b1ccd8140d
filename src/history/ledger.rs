// src/history/ledger.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::change::{AffectedType, Change};

/// How changes are partitioned into commits/pull requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// One change set per affected type.
    #[default]
    PerType,
    /// Everything in one change set.
    Single,
}

/// Changes handed to one commit/pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet<'a> {
    /// `None` for an aggregated set spanning several types.
    pub affected_type: Option<&'a AffectedType>,
    pub changes: Vec<&'a Change>,
}

impl ChangeSet<'_> {
    /// Distinct affected types, in first-appearance order.
    #[must_use]
    pub fn affected_types(&self) -> Vec<&AffectedType> {
        let mut out: Vec<&AffectedType> = Vec::new();
        for change in &self.changes {
            if !out.contains(&change.affected_type()) {
                out.push(change.affected_type());
            }
        }
        out
    }
}

/// Append-only record of the changes applied during one job, in the order
/// processors produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ledger {
    changes: Vec<Change>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[must_use]
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Types touched by at least one change, in first-appearance order.
    #[must_use]
    pub fn changed_types(&self) -> Vec<&AffectedType> {
        self.group_by_type().into_iter().map(|(t, _)| t).collect()
    }

    /// Changes grouped by affected type; groups and their contents keep
    /// ledger order.
    #[must_use]
    pub fn group_by_type(&self) -> Vec<(&AffectedType, Vec<&Change>)> {
        let mut index: HashMap<&AffectedType, usize> = HashMap::new();
        let mut groups: Vec<(&AffectedType, Vec<&Change>)> = Vec::new();
        for change in &self.changes {
            let key = change.affected_type();
            let slot = *index.entry(key).or_insert_with(|| {
                groups.push((key, Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(change);
        }
        groups
    }

    /// Splits the ledger into change sets according to `grouping`.
    #[must_use]
    pub fn partition(&self, grouping: Grouping) -> Vec<ChangeSet<'_>> {
        if self.is_empty() {
            return Vec::new();
        }
        match grouping {
            Grouping::PerType => self
                .group_by_type()
                .into_iter()
                .map(|(affected_type, changes)| ChangeSet {
                    affected_type: Some(affected_type),
                    changes,
                })
                .collect(),
            Grouping::Single => vec![ChangeSet {
                affected_type: None,
                changes: self.changes.iter().collect(),
            }],
        }
    }
}

impl Extend<Change> for Ledger {
    fn extend<T: IntoIterator<Item = Change>>(&mut self, iter: T) {
        self.changes.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}
