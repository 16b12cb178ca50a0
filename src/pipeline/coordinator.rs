//! Run settings and output preparation.

use crate::cli::FilterArgs;
use crate::config::{AudioTimeBase, Config, VideoStrategy, validate_config};
use crate::error::{Error, Result};
use crate::pipeline::DatasetLayout;
use crate::video::VideoClipper;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Effective settings of a run after merging CLI flags over the config file.
#[derive(Debug, Clone)]
pub struct FilterSettings {
    /// Maximum vehicles allowed in any frame of a segment.
    pub max_vehicles: u32,
    /// Segments must last strictly longer than this many seconds.
    pub min_duration: f64,
    /// Frame rate of the rendered videos.
    pub fps: u32,
    /// Source dataset root.
    pub input_root: PathBuf,
    /// Filtered dataset root.
    pub output_root: PathBuf,
    /// ffmpeg executable.
    pub ffmpeg: PathBuf,
    /// How video clips are cut.
    pub video_strategy: VideoStrategy,
    /// Sample rate of written audio clips, native when unset.
    pub audio_sample_rate: Option<u32>,
    /// Time origin of the filtered audio annotations.
    pub audio_time_base: AudioTimeBase,
    /// Skip all media work.
    pub annotations_only: bool,
}

impl FilterSettings {
    /// Merge `args` over `config` and validate the result.
    pub fn resolve(args: &FilterArgs, config: &Config) -> Result<Self> {
        let mut merged = config.clone();

        if let Some(max_vehicles) = args.max_vehicles {
            merged.defaults.max_vehicles = max_vehicles;
        }
        if let Some(min_duration) = args.min_duration {
            merged.defaults.min_duration = min_duration;
        }
        if let Some(fps) = args.fps {
            merged.defaults.fps = fps;
        }
        if let Some(ref root) = args.input_root {
            merged.dataset.input_root.clone_from(root);
        }
        if let Some(ref root) = args.output_root {
            merged.dataset.output_root.clone_from(root);
        }
        if let Some(ref ffmpeg) = args.ffmpeg {
            merged.media.ffmpeg.clone_from(ffmpeg);
        }
        if let Some(strategy) = args.video_strategy {
            merged.media.video_strategy = strategy;
        }
        if args.audio_sample_rate.is_some() {
            merged.media.audio_sample_rate = args.audio_sample_rate;
        }
        if let Some(time_base) = args.audio_time_base {
            merged.media.audio_time_base = time_base;
        }

        validate_config(&merged)?;

        Ok(Self {
            max_vehicles: merged.defaults.max_vehicles,
            min_duration: merged.defaults.min_duration,
            fps: merged.defaults.fps,
            input_root: merged.dataset.input_root,
            output_root: merged.dataset.output_root,
            ffmpeg: merged.media.ffmpeg,
            video_strategy: merged.media.video_strategy,
            audio_sample_rate: merged.media.audio_sample_rate,
            audio_time_base: merged.media.audio_time_base,
            annotations_only: args.annotations_only,
        })
    }

    /// Layout of the source dataset.
    pub fn input_layout(&self) -> DatasetLayout {
        DatasetLayout::new(self.input_root.clone())
    }

    /// Layout of the filtered dataset.
    pub fn output_layout(&self) -> DatasetLayout {
        DatasetLayout::new(self.output_root.clone())
    }
}

/// Everything `process_file` needs besides the annotations of one file.
#[derive(Debug)]
pub struct FilterContext {
    /// Run settings.
    pub settings: FilterSettings,
    /// Source dataset.
    pub input: DatasetLayout,
    /// Filtered dataset.
    pub output: DatasetLayout,
    /// Video cutter, absent in annotations-only runs.
    pub clipper: Option<VideoClipper>,
}

impl FilterContext {
    /// Build the context for `settings`.
    pub fn new(settings: FilterSettings) -> Self {
        let clipper = (!settings.annotations_only)
            .then(|| VideoClipper::new(settings.ffmpeg.clone(), settings.video_strategy));
        Self {
            input: settings.input_layout(),
            output: settings.output_layout(),
            clipper,
            settings,
        }
    }
}

/// Create the output folders of the filtered dataset.
///
/// Media folders are only created when media will be written.
pub fn prepare_output_layout(layout: &DatasetLayout, fps: u32, with_media: bool) -> Result<()> {
    create_dir(&layout.annotations_dir())?;
    if with_media {
        create_dir(&layout.video_dir(fps))?;
        create_dir(&layout.audio_dir())?;
    }
    Ok(())
}

fn create_dir(path: &Path) -> Result<()> {
    debug!("Creating {}", path.display());
    std::fs::create_dir_all(path).map_err(|e| Error::OutputDirCreateFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> FilterArgs {
        let mut argv = vec!["urbansas-filter"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).unwrap().filter
    }

    #[test]
    fn test_resolve_uses_config_without_flags() {
        let mut config = Config::default();
        config.defaults.max_vehicles = 5;

        let settings = FilterSettings::resolve(&args(&[]), &config).unwrap();
        assert_eq!(settings.max_vehicles, 5);
        assert_eq!(settings.min_duration, 4.0);
        assert_eq!(settings.fps, 8);
        assert!(!settings.annotations_only);
    }

    #[test]
    fn test_resolve_flags_override_config() {
        let settings = FilterSettings::resolve(
            &args(&["-n", "0", "-d", "1.5", "--fps", "24", "--audio-time-base", "segment"]),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(settings.max_vehicles, 0);
        assert_eq!(settings.min_duration, 1.5);
        assert_eq!(settings.fps, 24);
        assert_eq!(settings.audio_time_base, AudioTimeBase::Segment);
    }

    #[test]
    fn test_resolve_rejects_same_roots() {
        let result = FilterSettings::resolve(&args(&["-i", "data", "-o", "data"]), &Config::default());
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_context_without_media_has_no_clipper() {
        let settings =
            FilterSettings::resolve(&args(&["--annotations-only"]), &Config::default()).unwrap();
        assert!(FilterContext::new(settings).clipper.is_none());
    }

    #[test]
    fn test_prepare_output_layout_skips_media_dirs() {
        let dir = TempDir::new().unwrap();
        let layout = DatasetLayout::new(dir.path().join("out"));

        prepare_output_layout(&layout, 8, false).unwrap();
        assert!(layout.annotations_dir().is_dir());
        assert!(!layout.audio_dir().exists());

        prepare_output_layout(&layout, 8, true).unwrap();
        assert!(layout.video_dir(8).is_dir());
        assert!(layout.audio_dir().is_dir());
    }
}
