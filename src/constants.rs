//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "urbansas-filter";

/// Time between two consecutive annotated frames, in seconds.
///
/// Annotation frame ids are sampled at a fixed 2 Hz regardless of the frame
/// rate of the rendered videos, so frame/time conversions always use this
/// interval and never the configured `fps`.
pub const FRAME_INTERVAL_SECS: f64 = 0.5;

/// Default maximum number of vehicles allowed in a single frame.
pub const DEFAULT_MAX_VEHICLES: u32 = 2;

/// Default minimum segment duration in seconds (exclusive).
pub const DEFAULT_MIN_DURATION: f64 = 4.0;

/// Default frame rate of the rendered videos, used to locate them.
pub const DEFAULT_FPS: u32 = 8;

/// Default location of the source dataset.
pub const DEFAULT_INPUT_ROOT: &str = "data/urbansas";

/// Default location of the filtered dataset.
pub const DEFAULT_OUTPUT_ROOT: &str = "data/urbansas_filtered";

/// Default ffmpeg executable.
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Upper bound accepted for an explicit audio sample rate.
pub const MAX_SAMPLE_RATE: u32 = 384_000;

/// Dataset directory layout, relative to a dataset root.
pub mod layout {
    /// Annotation directory.
    pub const ANNOTATIONS_DIR: &str = "annotations";
    /// Video annotation table.
    pub const VIDEO_ANNOTATIONS: &str = "video_annotations.csv";
    /// Audio annotation table.
    pub const AUDIO_ANNOTATIONS: &str = "audio_annotations.csv";
    /// Segment manifest written next to the filtered annotations.
    pub const SEGMENT_MANIFEST: &str = "segments.json";
    /// Audio directory.
    pub const AUDIO_DIR: &str = "audio";
    /// Video root directory.
    pub const VIDEO_DIR: &str = "video";
    /// Audio file extension.
    pub const AUDIO_EXTENSION: &str = "wav";
    /// Video file extension.
    pub const VIDEO_EXTENSION: &str = "mp4";

    /// Name of the per-fps video subdirectory.
    pub fn video_subdir(fps: u32) -> String {
        format!("video_{fps}fps_audio_merged")
    }
}

/// Annotation table column names.
pub mod columns {
    /// Source file identifier (no extension).
    pub const FILENAME: &str = "filename";
    /// Video frame index.
    pub const FRAME_ID: &str = "frame_id";
    /// Video frame time in seconds.
    pub const TIME: &str = "time";
    /// Audio event start in seconds.
    pub const START: &str = "start";
    /// Audio event end in seconds.
    pub const END: &str = "end";
}

/// ffmpeg encoder settings for re-encoded clips.
pub mod ffmpeg {
    /// Video codec for re-encoded clips.
    pub const VIDEO_CODEC: &str = "libx264";
    /// Audio codec for re-encoded clips.
    pub const AUDIO_CODEC: &str = "aac";
    /// ffmpeg log level, keeps stderr limited to real failures.
    pub const LOG_LEVEL: &str = "error";
}
