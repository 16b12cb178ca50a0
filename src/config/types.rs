//! Configuration type definitions.

use crate::constants::{
    DEFAULT_FFMPEG, DEFAULT_FPS, DEFAULT_INPUT_ROOT, DEFAULT_MAX_VEHICLES, DEFAULT_MIN_DURATION,
    DEFAULT_OUTPUT_ROOT,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filtering thresholds.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Dataset locations.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Media handling settings.
    #[serde(default)]
    pub media: MediaConfig,
}

/// Default filtering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Maximum number of vehicles allowed in any frame of a segment.
    pub max_vehicles: u32,

    /// Minimum segment duration in seconds (exclusive).
    pub min_duration: f64,

    /// Frame rate of the rendered videos to cut.
    pub fps: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            max_vehicles: DEFAULT_MAX_VEHICLES,
            min_duration: DEFAULT_MIN_DURATION,
            fps: DEFAULT_FPS,
        }
    }
}

/// Dataset root directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Root of the source dataset.
    pub input_root: PathBuf,

    /// Root of the filtered dataset.
    pub output_root: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from(DEFAULT_INPUT_ROOT),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
        }
    }
}

/// Media handling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// ffmpeg executable used to cut videos.
    pub ffmpeg: PathBuf,

    /// How video clips are cut.
    pub video_strategy: VideoStrategy,

    /// Sample rate of written audio clips (native rate when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_sample_rate: Option<u32>,

    /// Time origin of the filtered audio annotations.
    pub audio_time_base: AudioTimeBase,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from(DEFAULT_FFMPEG),
            video_strategy: VideoStrategy::default(),
            audio_sample_rate: None,
            audio_time_base: AudioTimeBase::default(),
        }
    }
}

/// Video cutting strategy.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum VideoStrategy {
    /// Re-encode the clip, frame accurate.
    #[default]
    Reencode,
    /// Copy streams, cuts snap to keyframes.
    Copy,
}

/// Time origin of the filtered audio annotations.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AudioTimeBase {
    /// Keep times of the original recording.
    #[default]
    Absolute,
    /// Shift times so the segment starts at 0, like the video annotations.
    Segment,
}

impl std::fmt::Display for VideoStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reencode => write!(f, "reencode"),
            Self::Copy => write!(f, "copy"),
        }
    }
}

impl std::fmt::Display for AudioTimeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absolute => write!(f, "absolute"),
            Self::Segment => write!(f, "segment"),
        }
    }
}
