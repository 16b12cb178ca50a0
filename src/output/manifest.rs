//! JSON manifest of the segments written by a run.

use crate::error::{Error, Result};
use crate::segment::Segment;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Manifest written next to the filtered annotation tables.
#[derive(Debug, Serialize)]
pub struct SegmentManifest {
    /// When the run finished.
    pub generated_at: DateTime<Utc>,
    /// Parameters of the run.
    pub settings: ManifestSettings,
    /// Summary counts.
    pub summary: ManifestSummary,
    /// Every segment written, in output order.
    pub segments: Vec<SegmentEntry>,
}

/// Run parameters recorded in the manifest.
#[derive(Debug, Serialize)]
pub struct ManifestSettings {
    /// Maximum vehicles per frame.
    pub max_vehicles: u32,
    /// Exclusive minimum duration in seconds.
    pub min_duration: f64,
    /// Frame rate of the cut videos.
    pub fps: u32,
    /// Source dataset root.
    pub input_root: PathBuf,
    /// Whether media clips were written.
    pub media_written: bool,
    /// Time origin of the audio annotations.
    pub audio_time_base: String,
}

/// Summary counts of a run.
#[derive(Debug, Default, Serialize)]
pub struct ManifestSummary {
    /// Files in the source dataset.
    pub files_total: usize,
    /// Files that produced at least one segment.
    pub files_with_segments: usize,
    /// Files skipped because of an error.
    pub files_failed: usize,
    /// Segments written.
    pub segments: usize,
    /// Total duration of the written segments in seconds.
    pub total_duration: f64,
}

/// One output segment.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentEntry {
    /// Output identifier, `{source_file}_{index}`.
    pub id: String,
    /// Source file identifier.
    pub source_file: String,
    /// Frame range in the source file.
    #[serde(flatten)]
    pub segment: Segment,
    /// Absolute start time in the source file.
    pub start_time: f64,
    /// Absolute end time in the source file.
    pub end_time: f64,
    /// Video annotation rows kept.
    pub video_annotations: usize,
    /// Audio annotation rows kept.
    pub audio_annotations: usize,
    /// Written video clip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_clip: Option<PathBuf>,
    /// Written audio clip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_clip: Option<PathBuf>,
}

/// Write the manifest as pretty-printed JSON.
pub fn write_manifest(path: &Path, manifest: &SegmentManifest) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, manifest).map_err(|e| Error::ManifestWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
