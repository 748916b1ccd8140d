// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::tree::NodeId;

#[derive(Debug, Error)]
pub enum SmellfixError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Failed to load syntax trees from {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("Invalid tree snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Could not write configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Formatting failed: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Node {0} does not exist in this tree")]
    UnknownNode(NodeId),

    #[error("Rewrite by {processor} failed at node {node}: {reason}")]
    Rewrite {
        processor: &'static str,
        node: NodeId,
        reason: String,
    },

    #[error("Git error: {0}")]
    Git(String),

    #[error("Generic error: {0}")]
    Other(String),
}

impl SmellfixError {
    /// Builds a rewrite failure for `processor` at `node`.
    pub fn rewrite(processor: &'static str, node: NodeId, reason: impl Into<String>) -> Self {
        Self::Rewrite {
            processor,
            node,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SmellfixError>;

// Allow `?` on std::io::Error by converting to SmellfixError::Io with unknown path.
impl From<std::io::Error> for SmellfixError {
    fn from(source: std::io::Error) -> Self {
        SmellfixError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for SmellfixError {
    fn from(e: walkdir::Error) -> Self {
        let path = e.path().map(PathBuf::from).unwrap_or_default();
        SmellfixError::Load {
            path,
            reason: e.to_string(),
        }
    }
}

/// Attaches a path to I/O failures.
pub trait IoContext<T> {
    /// Converts the error into [`SmellfixError::Io`] carrying `path`.
    ///
    /// # Errors
    /// Returns the wrapped I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| SmellfixError::Io {
            source,
            path: path.into(),
        })
    }
}
