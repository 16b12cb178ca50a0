//! Segment extraction and annotation projection.
//!
//! This module is the pure core of the filter: it turns framewise object
//! counts into low-occupancy segments and re-expresses the annotation
//! streams on each segment. It performs no I/O.

mod counts;
mod finder;
mod projector;

pub use counts::{FileFrameCounts, framewise_counts, validate_frame_counts};
pub use finder::{FrameCount, Segment, find_segments};
pub use projector::{Projection, project, project_audio, project_video, rebase_audio};
