// src/workspace.rs
//! Scratch directories for checkouts.
//!
//! A [`ScratchCheckout`] is removed when it goes out of scope, on success and
//! on error paths alike. A detached backstop thread removes it after
//! [`BACKSTOP`] in case the owner never drops it (a hung job, a leaked guard).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tempfile::TempDir;
use thiserror::Error;
use tracing::debug;

use crate::error::{IoContext, Result};

/// Delay before the backstop removes a checkout still on disk.
pub const BACKSTOP: Duration = Duration::from_secs(60 * 60);

/// A failed removal. Safe to ignore: the directory lives under the system
/// temp dir and the backstop or the OS will reclaim it.
#[derive(Debug, Error)]
#[error("could not remove scratch directory {path}: {source}")]
pub struct CleanupError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug)]
pub enum CleanupOutcome {
    Removed,
    AlreadyGone,
    Failed(CleanupError),
}

#[derive(Debug)]
pub struct ScratchCheckout {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl ScratchCheckout {
    /// Creates a scratch directory with the default backstop.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub fn new(prefix: &str) -> Result<Self> {
        Self::with_backstop(prefix, BACKSTOP)
    }

    /// Creates a scratch directory removed after `after` at the latest.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub fn with_backstop(prefix: &str, after: Duration) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir()
            .with_path(std::env::temp_dir())?;
        let path = dir.path().to_path_buf();
        spawn_backstop(path.clone(), after);
        debug!(path = %path.display(), "created scratch checkout");
        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the directory now and reports how that went.
    #[must_use]
    pub fn close(mut self) -> CleanupOutcome {
        self.release()
    }

    fn release(&mut self) -> CleanupOutcome {
        let Some(dir) = self.dir.take() else {
            return CleanupOutcome::AlreadyGone;
        };
        match dir.close() {
            Ok(()) => CleanupOutcome::Removed,
            Err(source) if source.kind() == io::ErrorKind::NotFound => CleanupOutcome::AlreadyGone,
            Err(source) => CleanupOutcome::Failed(CleanupError {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl Drop for ScratchCheckout {
    fn drop(&mut self) {
        if let CleanupOutcome::Failed(error) = self.release() {
            debug!(%error, "scratch cleanup failed, safe to ignore");
        }
    }
}

fn spawn_backstop(path: PathBuf, after: Duration) {
    let spawned = thread::Builder::new()
        .name("scratch-backstop".into())
        .spawn(move || {
            thread::sleep(after);
            match fs::remove_dir_all(&path) {
                Ok(()) => debug!(path = %path.display(), "backstop removed scratch checkout"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(error) => {
                    debug!(path = %path.display(), %error, "backstop cleanup failed, safe to ignore");
                }
            }
        });
    if let Err(error) = spawned {
        debug!(%error, "could not start backstop thread");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_removes_directory() {
        let path = {
            let checkout = ScratchCheckout::new("smellfix-test-").unwrap();
            fs::write(checkout.path().join("file.txt"), "x").unwrap();
            checkout.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn directory_removed_on_error_path() {
        fn failing(checkout: &ScratchCheckout) -> Result<()> {
            fs::create_dir(checkout.path().join("nested")).with_path(checkout.path())?;
            Err(crate::error::SmellfixError::Other("job failed".into()))
        }

        let checkout = ScratchCheckout::new("smellfix-test-").unwrap();
        let path = checkout.path().to_path_buf();
        let result = failing(&checkout);
        drop(checkout);

        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn close_reports_outcome() {
        let checkout = ScratchCheckout::new("smellfix-test-").unwrap();
        assert!(matches!(checkout.close(), CleanupOutcome::Removed));

        let gone = ScratchCheckout::new("smellfix-test-").unwrap();
        fs::remove_dir_all(gone.path()).unwrap();
        assert!(matches!(gone.close(), CleanupOutcome::AlreadyGone));
    }

    #[test]
    fn backstop_removes_leaked_checkout() {
        let checkout =
            ScratchCheckout::with_backstop("smellfix-test-", Duration::from_millis(20)).unwrap();
        let path = checkout.path().to_path_buf();
        std::mem::forget(checkout);

        let mut waited = Duration::ZERO;
        while path.exists() && waited < Duration::from_secs(5) {
            thread::sleep(Duration::from_millis(20));
            waited += Duration::from_millis(20);
        }
        assert!(!path.exists());
    }
}
