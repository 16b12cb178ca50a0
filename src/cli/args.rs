//! CLI argument definitions.

use super::validators::parse_duration_secs;
use crate::config::{AudioTimeBase, VideoStrategy};
use crate::constants::MAX_SAMPLE_RATE;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Filter an audio-video traffic dataset down to low-occupancy segments.
#[derive(Debug, Parser)]
#[command(name = "urbansas-filter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (default: filter the dataset).
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "URBANSAS_FILTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Filtering options.
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the segments each file would be cut into, without writing anything.
    Scan {
        /// Print segments as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for filtering the dataset.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct FilterArgs {
    /// Root of the source dataset.
    #[arg(short, long, global = true, env = "URBANSAS_FILTER_INPUT_ROOT")]
    pub input_root: Option<PathBuf>,

    /// Root of the filtered dataset.
    #[arg(short, long, env = "URBANSAS_FILTER_OUTPUT_ROOT")]
    pub output_root: Option<PathBuf>,

    /// Frame rate of the rendered videos to cut.
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..),
          env = "URBANSAS_FILTER_FPS")]
    pub fps: Option<u32>,

    /// Maximum number of vehicles allowed in any frame of a segment.
    #[arg(short = 'n', long, global = true, env = "URBANSAS_FILTER_MAX_VEHICLES")]
    pub max_vehicles: Option<u32>,

    /// Minimum segment duration in seconds (segments must be strictly longer).
    #[arg(short = 'd', long, global = true, value_parser = parse_duration_secs,
          env = "URBANSAS_FILTER_MIN_DURATION")]
    pub min_duration: Option<f64>,

    /// Resample audio clips to this rate in Hz (default: keep native rate).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_SAMPLE_RATE)),
          env = "URBANSAS_FILTER_AUDIO_SAMPLE_RATE")]
    pub audio_sample_rate: Option<u32>,

    /// Time origin of the filtered audio annotations.
    #[arg(long, value_enum, env = "URBANSAS_FILTER_AUDIO_TIME_BASE")]
    pub audio_time_base: Option<AudioTimeBase>,

    /// How video clips are cut.
    #[arg(long, value_enum, env = "URBANSAS_FILTER_VIDEO_STRATEGY")]
    pub video_strategy: Option<VideoStrategy>,

    /// ffmpeg executable.
    #[arg(long, env = "URBANSAS_FILTER_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Write filtered annotations only, without cutting audio or video.
    #[arg(long)]
    pub annotations_only: bool,

    /// Stop on first file error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Disable progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Suppress progress and informational output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
