//! Low-occupancy segment extraction.

use serde::Serialize;

use crate::constants::FRAME_INTERVAL_SECS;

/// Number of annotated objects in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCount {
    /// Frame index at the fixed annotation rate.
    pub frame_id: u32,
    /// Number of objects annotated in the frame.
    pub count: u32,
}

/// An inclusive frame range of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Segment {
    /// First frame of the segment.
    pub start_frame_id: u32,
    /// Last frame of the segment (inclusive).
    pub end_frame_id: u32,
}

impl Segment {
    /// Create a segment spanning `start_frame_id..=end_frame_id`.
    pub fn new(start_frame_id: u32, end_frame_id: u32) -> Self {
        debug_assert!(start_frame_id <= end_frame_id);
        Self {
            start_frame_id,
            end_frame_id,
        }
    }

    /// Absolute start time in seconds.
    pub fn start_time(&self) -> f64 {
        f64::from(self.start_frame_id) * FRAME_INTERVAL_SECS
    }

    /// Absolute end time in seconds.
    pub fn end_time(&self) -> f64 {
        f64::from(self.end_frame_id) * FRAME_INTERVAL_SECS
    }

    /// Duration in seconds, zero for a single frame.
    pub fn duration(&self) -> f64 {
        f64::from(self.end_frame_id - self.start_frame_id) * FRAME_INTERVAL_SECS
    }

    /// Whether `frame_id` lies inside the segment.
    pub fn contains_frame(&self, frame_id: u32) -> bool {
        (self.start_frame_id..=self.end_frame_id).contains(&frame_id)
    }
}

/// Find the maximal runs of frames with at most `max_count` objects that
/// last strictly longer than `min_duration` seconds.
///
/// `counts` must be sorted by frame id without gaps (see
/// [`super::validate_frame_counts`]). Segments come back in frame order and
/// never overlap. A run of one frame has zero duration and is never emitted.
pub fn find_segments(counts: &[FrameCount], max_count: u32, min_duration: f64) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = 0;

    for (i, frame) in counts.iter().enumerate() {
        if frame.count > max_count {
            start = i + 1;
            continue;
        }

        let closes = counts
            .get(i + 1)
            .is_none_or(|next| next.count > max_count);

        if closes {
            let segment = Segment::new(counts[start].frame_id, frame.frame_id);
            if segment.duration() > min_duration {
                segments.push(segment);
            }
            start = i + 1;
        }
    }

    segments
}
