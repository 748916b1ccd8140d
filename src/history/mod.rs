// src/history/mod.rs
//! Provenance of applied rewrites.

pub mod change;
pub mod ledger;

pub use self::change::{AffectedType, Category, Change};
pub use self::ledger::{ChangeSet, Grouping, Ledger};

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
