//! Dry-run segment listing.

use crate::annotations::VideoAnnotation;
use crate::segment::{Segment, find_segments, framewise_counts, validate_frame_counts};
use serde::Serialize;

/// Segments found in one source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSegments {
    /// Source file identifier.
    pub filename: String,
    /// Number of annotated frames.
    pub frames: usize,
    /// Segments in frame order.
    pub segments: Vec<Segment>,
    /// Why the file would be skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Find the segments of every file without touching media.
pub fn scan_segments(
    rows: &[VideoAnnotation],
    max_vehicles: u32,
    min_duration: f64,
) -> Vec<FileSegments> {
    framewise_counts(rows)
        .into_iter()
        .map(|file| {
            let frames = file.counts.len();
            match validate_frame_counts(&file.filename, &file.counts) {
                Ok(()) => FileSegments {
                    segments: find_segments(&file.counts, max_vehicles, min_duration),
                    filename: file.filename,
                    frames,
                    error: None,
                },
                Err(e) => FileSegments {
                    filename: file.filename,
                    frames,
                    segments: Vec::new(),
                    error: Some(e.to_string()),
                },
            }
        })
        .collect()
}
