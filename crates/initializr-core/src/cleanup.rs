//! Temporary files that must not outlive an interrupted session
//!
//! Drop-based cleanup never runs when the process exits from a signal handler. Files whose
//! removal matters are tracked here as well, so the interrupt path can delete whatever is
//! still registered before exiting.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// Shared set of paths to delete on interrupt
///
/// Clones share the same set, so one clone can live in the signal handler while another is
/// handed to the session.
#[derive(Debug, Clone, Default)]
pub struct CleanupRegistry {
    paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PathBuf>> {
        // a panic while holding the lock leaves the list itself intact
        self.paths.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register `path` until the returned guard is dropped
    #[must_use = "the path is unregistered as soon as the registration is dropped"]
    pub fn track(&self, path: impl Into<PathBuf>) -> Registration {
        let path = path.into();
        debug!(path = %path.display(), "tracking temporary file");
        self.lock().push(path.clone());
        Registration {
            registry: self.clone(),
            path,
        }
    }

    /// Paths currently registered
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().clone()
    }

    /// Delete every registered file and clear the registry
    ///
    /// Files that are already gone are skipped. Returns the paths that were removed.
    pub fn remove_all(&self) -> Vec<PathBuf> {
        let pending = std::mem::take(&mut *self.lock());
        pending
            .into_iter()
            .filter(|path| match std::fs::remove_file(path) {
                Ok(()) => true,
                Err(e) if e.kind() == ErrorKind::NotFound => false,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to remove temporary file");
                    false
                }
            })
            .collect()
    }

    fn untrack(&self, path: &Path) {
        let mut paths = self.lock();
        if let Some(pos) = paths.iter().position(|p| p == path) {
            paths.swap_remove(pos);
        }
    }
}

/// Keeps a path registered for as long as it is alive
#[derive(Debug)]
pub struct Registration {
    registry: CleanupRegistry,
    path: PathBuf,
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.registry.untrack(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_drop_unregisters() {
        let registry = CleanupRegistry::new();
        let first = registry.track("/tmp/a.json");
        let second = registry.track("/tmp/b.json");
        assert_eq!(registry.paths().len(), 2);

        drop(first);
        assert_eq!(registry.paths(), vec![PathBuf::from("/tmp/b.json")]);
        drop(second);
        assert!(registry.paths().is_empty());
    }

    #[test]
    fn test_remove_all_deletes_tracked_files() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("spool.json");
        let missing = dir.path().join("gone.json");
        std::fs::write(&present, "{}").unwrap();

        let registry = CleanupRegistry::new();
        let _present = registry.track(&present);
        let _missing = registry.track(&missing);

        let removed = registry.clone().remove_all();

        assert_eq!(removed, vec![present.clone()]);
        assert!(!present.exists());
        assert!(registry.paths().is_empty());
    }

    #[test]
    fn test_untracked_file_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keep.json");
        std::fs::write(&path, "{}").unwrap();

        let registry = CleanupRegistry::new();
        drop(registry.track(&path));

        assert!(registry.remove_all().is_empty());
        assert!(path.exists());
    }
}
