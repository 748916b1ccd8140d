// src/discovery.rs
//! Source-root discovery.
//!
//! A project is walked for candidate directories, candidates are filtered by
//! suffix and the survivors are reduced to an antichain: no retained root
//! lies inside another one, so every file is loaded exactly once.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;

/// Keeps paths ending with one of `suffixes`, compared component-wise.
#[must_use]
pub fn filter_source_roots<S: AsRef<str>>(paths: Vec<PathBuf>, suffixes: &[S]) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|p| suffixes.iter().any(|s| p.ends_with(s.as_ref())))
        .collect()
}

/// Drops every path that lies inside (or equals) an already kept one.
///
/// Paths are visited shallowest first, so the outermost path of any nested
/// chain is the one kept. Order among equally deep paths is preserved.
#[must_use]
pub fn remove_redundant_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut sorted = paths;
    sorted.sort_by_key(|p| p.components().count());
    let mut kept: Vec<PathBuf> = Vec::new();
    for path in sorted {
        if kept.iter().any(|k| path.starts_with(k)) {
            debug!(path = %path.display(), "covered by another root");
            continue;
        }
        kept.push(path);
    }
    kept
}

/// Suffix filter followed by containment dedup.
#[must_use]
pub fn resolve<S: AsRef<str>>(candidates: Vec<PathBuf>, suffixes: &[S]) -> Vec<PathBuf> {
    remove_redundant_paths(filter_source_roots(candidates, suffixes))
}

/// Every directory below `dir`, including `dir`, skipping pruned names.
#[must_use]
pub fn discover_candidates<S: AsRef<str>>(dir: &Path, prune: &[S]) -> Vec<PathBuf> {
    let walker = WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !prune.iter().any(|p| e.file_name().to_string_lossy() == p.as_ref())
        });

    let mut dirs = Vec::new();
    let mut errors = 0usize;
    for item in walker {
        match item {
            Ok(entry) if entry.file_type().is_dir() => dirs.push(entry.into_path()),
            Ok(_) => {}
            Err(_) => errors += 1,
        }
    }
    if errors > 0 {
        warn!(dir = %dir.display(), errors, "errors during directory walk");
    }
    dirs
}

/// Source roots of the project at `project` according to `config`.
#[must_use]
pub fn discover_source_roots(project: &Path, config: &Config) -> Vec<PathBuf> {
    let candidates = discover_candidates(&config.source_dir(project), &config.prune_dirs);
    let roots = resolve(candidates, &config.source_suffixes);
    debug!(project = %project.display(), roots = roots.len(), "resolved source roots");
    roots
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
