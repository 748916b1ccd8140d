// src/cli/mod.rs
//! CLI command handlers.

pub mod args;
pub mod handlers;

pub use args::{Cli, Commands};
pub use handlers::{
    handle_findings, handle_fix, handle_init, handle_remote, handle_roots, handle_smells, FixArgs,
};
