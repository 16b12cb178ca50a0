//! Removal of partially written media clips.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// RAII guard over the clips written for one file.
///
/// Unless [`WrittenClips::keep`] is called, every recorded clip is deleted
/// when the guard is dropped, so a failed file leaves no media behind.
#[derive(Debug, Default)]
pub struct WrittenClips {
    paths: Vec<PathBuf>,
}

impl WrittenClips {
    /// Start with no clips recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a clip that now exists on disk.
    pub fn record(&mut self, path: &Path) {
        self.paths.push(path.to_path_buf());
    }

    /// Number of recorded clips.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no clip has been recorded.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Keep the clips on disk.
    pub fn keep(mut self) {
        self.paths.clear();
    }
}

impl Drop for WrittenClips {
    fn drop(&mut self) {
        for path in &self.paths {
            if let Err(e) = fs::remove_file(path)
                && e.kind() != std::io::ErrorKind::NotFound
            {
                warn!("Failed to remove partial clip {}: {e}", path.display());
            }
        }
    }
}
