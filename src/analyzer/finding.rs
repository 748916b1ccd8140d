// src/analyzer/finding.rs
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// One result reported by the external static analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalyzerFinding {
    pub rule_id: String,
    pub file_path: PathBuf,
    pub message: String,
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl AnalyzerFinding {
    pub fn new(
        rule_id: impl Into<String>,
        file_path: impl Into<PathBuf>,
        message: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            file_path: file_path.into(),
            message: message.into(),
            snippet: snippet.into(),
            line: None,
        }
    }

    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Content-derived identifier, stable across runs and processes.
    ///
    /// Every field is length-prefixed before hashing so that moving text
    /// between fields changes the result. Unlike `Hash`, the digest does not
    /// depend on the process's hasher seed.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        mix(&mut hasher, &self.rule_id);
        mix(&mut hasher, &self.file_path.to_string_lossy());
        mix(&mut hasher, &self.message);
        mix(&mut hasher, &self.snippet);
        match self.line {
            Some(line) => mix(&mut hasher, &line.to_string()),
            None => hasher.update([0u8]),
        }
        format!("{:x}", hasher.finalize())
    }
}

fn mix(hasher: &mut Sha256, field: &str) {
    hasher.update((field.len() as u64).to_le_bytes());
    hasher.update(field.as_bytes());
}
