// src/reporting/mod.rs
//! Markdown rendering of changes, findings and smells.
//!
//! The output is meant for commit messages and pull request bodies. Findings
//! attached to changes are embedded as HTML comments so a later run can read
//! back which findings were already handled.

pub mod changelog;
pub mod console;
pub mod findings;
pub mod smells;

pub use self::changelog::{
    extract_fingerprints, print_change_log, print_change_set, print_repaired_issues,
};
pub use self::findings::{print_all_results, print_results};
pub use self::smells::MarkdownSmellPrinter;

use std::path::Path;

/// Path as inline code, with forward slashes.
#[must_use]
pub fn path_markdown(path: &Path) -> String {
    format!("`{}`", path.to_string_lossy().replace('\\', "/"))
}

/// Fenced code block. The fence grows past any backtick run in `code`.
#[must_use]
pub fn code_block(language: &str, code: &str) -> String {
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest.max(2) + 1);
    format!("{fence}{language}\n{}\n{fence}\n", code.trim_end_matches('\n'))
}
