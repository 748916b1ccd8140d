// src/config/mod.rs
pub mod types;

pub use self::types::Config;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::analyzer::rules;
use crate::error::{IoContext, Result};
use crate::history::Grouping;

pub const CONFIG_FILE: &str = "smellfix.toml";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `smellfix.toml` from `dir`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).with_path(&path)?;
        let config = Self::parse_toml(&content)?;
        config.validate();
        Ok(config)
    }

    /// # Errors
    /// Returns error if `content` is not a valid config.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Logs rules this crate cannot repair. They are kept so findings for
    /// them still show up in reports.
    pub fn validate(&self) {
        for rule in self.active_rules.iter().filter(|r| !rules::is_known(r)) {
            warn!(rule = %rule, "active rule has no processor");
        }
    }

    /// Writes the config to `smellfix.toml` in `dir`.
    ///
    /// # Errors
    /// Returns error if serialization or the write fails.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content).with_path(&path)?;
        Ok(path)
    }

    #[must_use]
    pub fn grouping(&self) -> Grouping {
        if self.group_by_type {
            Grouping::PerType
        } else {
            Grouping::Single
        }
    }

    /// Where sources live below `project`.
    #[must_use]
    pub fn source_dir(&self, project: &Path) -> PathBuf {
        match self.src_folder.as_str() {
            "" | "." => project.to_path_buf(),
            folder => project.join(folder),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
