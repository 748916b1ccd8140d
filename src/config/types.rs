// src/config/types.rs
use serde::{Deserialize, Serialize};

use crate::analyzer::rules;

/// Contents of `smellfix.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Folder below the project root that holds the sources.
    #[serde(default = "default_src_folder")]
    pub src_folder: String,
    /// Directory suffixes a path must end with to count as a source root.
    #[serde(default = "default_source_suffixes")]
    pub source_suffixes: Vec<String>,
    /// Analyzer rules whose findings get repaired.
    #[serde(default = "default_active_rules")]
    pub active_rules: Vec<String>,
    /// One change set per affected type instead of a single one.
    #[serde(default = "default_group_by_type")]
    pub group_by_type: bool,
    /// Upper bound on change sets handed out per job.
    #[serde(default = "default_max_change_sets")]
    pub max_change_sets: usize,
    /// Directory names never descended into while discovering roots.
    #[serde(default = "default_prune_dirs")]
    pub prune_dirs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_folder: default_src_folder(),
            source_suffixes: default_source_suffixes(),
            active_rules: default_active_rules(),
            group_by_type: default_group_by_type(),
            max_change_sets: default_max_change_sets(),
            prune_dirs: default_prune_dirs(),
        }
    }
}

fn default_src_folder() -> String { ".".to_string() }
fn default_source_suffixes() -> Vec<String> {
    vec!["src/main/java".to_string(), "src/test/java".to_string()]
}
fn default_active_rules() -> Vec<String> {
    rules::ALL.iter().map(ToString::to_string).collect()
}
fn default_group_by_type() -> bool { true }
fn default_max_change_sets() -> usize { 10 }
fn default_prune_dirs() -> Vec<String> {
    [".git", "target", "build", "out", "node_modules", ".gradle", ".idea"]
        .iter()
        .map(ToString::to_string)
        .collect()
}
