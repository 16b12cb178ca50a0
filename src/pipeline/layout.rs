//! Directory layout of a dataset root.

use crate::constants::layout;
use std::path::{Path, PathBuf};

/// Paths of the annotation tables and media folders under a dataset root.
///
/// The same layout is used for the source dataset and the filtered copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    root: PathBuf,
}

impl DatasetLayout {
    /// Create a layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Dataset root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder holding the annotation tables.
    pub fn annotations_dir(&self) -> PathBuf {
        self.root.join(layout::ANNOTATIONS_DIR)
    }

    /// Video annotation table.
    pub fn video_annotations_path(&self) -> PathBuf {
        self.annotations_dir().join(layout::VIDEO_ANNOTATIONS)
    }

    /// Audio annotation table.
    pub fn audio_annotations_path(&self) -> PathBuf {
        self.annotations_dir().join(layout::AUDIO_ANNOTATIONS)
    }

    /// Segment manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.annotations_dir().join(layout::SEGMENT_MANIFEST)
    }

    /// Folder of the rendered videos at `fps`.
    pub fn video_dir(&self, fps: u32) -> PathBuf {
        self.root
            .join(layout::VIDEO_DIR)
            .join(layout::video_subdir(fps))
    }

    /// Folder of the audio recordings.
    pub fn audio_dir(&self) -> PathBuf {
        self.root.join(layout::AUDIO_DIR)
    }

    /// Video file of a recording.
    pub fn video_path(&self, filename: &str, fps: u32) -> PathBuf {
        self.video_dir(fps)
            .join(format!("{filename}.{}", layout::VIDEO_EXTENSION))
    }

    /// Audio file of a recording.
    pub fn audio_path(&self, filename: &str) -> PathBuf {
        self.audio_dir()
            .join(format!("{filename}.{}", layout::AUDIO_EXTENSION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = DatasetLayout::new("data/urbansas");
        assert_eq!(
            layout.video_annotations_path(),
            Path::new("data/urbansas/annotations/video_annotations.csv")
        );
        assert_eq!(
            layout.audio_annotations_path(),
            Path::new("data/urbansas/annotations/audio_annotations.csv")
        );
        assert_eq!(
            layout.video_path("street_01", 8),
            Path::new("data/urbansas/video/video_8fps_audio_merged/street_01.mp4")
        );
        assert_eq!(
            layout.audio_path("street_01"),
            Path::new("data/urbansas/audio/street_01.wav")
        );
        assert_eq!(
            layout.manifest_path(),
            Path::new("data/urbansas/annotations/segments.json")
        );
    }
}
