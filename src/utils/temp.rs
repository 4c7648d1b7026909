//! Scoped intermediate files

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Intermediate file removed when the guard goes out of scope.
///
/// The path is claimed before the producing stage runs, so a half-written
/// file left by a failed tool is removed too.
#[derive(Debug)]
pub struct ScopedArtifact {
    path: PathBuf,
}

impl ScopedArtifact {
    /// Claim `path` for the lifetime of the guard
    pub fn claim(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScopedArtifact {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed intermediate file"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                "Failed to remove intermediate file: {}", e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_artifact_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("temp_reel_part_1.mp4");
        fs::write(&path, b"data").unwrap();

        {
            let guard = ScopedArtifact::claim(&path);
            assert_eq!(guard.path(), path.as_path());
            assert!(path.exists());
        }

        assert!(!path.exists());
    }

    #[test]
    fn test_missing_artifact_is_ignored() {
        let dir = TempDir::new().unwrap();
        let guard = ScopedArtifact::claim(dir.path().join("never_written.mp4"));
        drop(guard);
    }
}
