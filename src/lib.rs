// src/lib.rs
//! Rule-based repair of code smells on language-neutral syntax trees.
//!
//! Processors rewrite [`tree::SyntaxTree`]s in place and record every edit in
//! a [`history::Ledger`]; reporting turns the ledger into markdown changelogs.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod history;
pub mod imports;
pub mod job;
pub mod logging;
pub mod reporting;
pub mod smells;
pub mod transform;
pub mod tree;
pub mod vcs;
pub mod workspace;
