//! Single file processing pipeline.

use crate::annotations::{AudioAnnotation, VideoAnnotation, relabel, segment_id};
use crate::audio::{DecodedAudio, decode_audio_file, resample_audio, slice_seconds, write_wav};
use crate::config::AudioTimeBase;
use crate::error::{Error, Result};
use crate::output::SegmentEntry;
use crate::pipeline::{DatasetLayout, FilterContext, WrittenClips};
use crate::segment::{
    FileFrameCounts, Projection, Segment, find_segments, project, rebase_audio,
    validate_frame_counts,
};
use crate::video::VideoClipper;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rows and segments produced for one source file.
#[derive(Debug, Default)]
pub struct FileOutput {
    /// One entry per emitted segment, in segment order.
    pub entries: Vec<SegmentEntry>,
    /// Relabelled video annotations of all segments.
    pub video: Vec<VideoAnnotation>,
    /// Relabelled audio annotations of all segments.
    pub audio: Vec<AudioAnnotation>,
}

impl FileOutput {
    /// Number of segments emitted.
    pub fn segments(&self) -> usize {
        self.entries.len()
    }
}

/// Cut one source file into its low-occupancy segments.
///
/// `video` and `audio` hold the annotations of this file in table order.
/// Media is only opened when at least one segment survives. On error every
/// clip already written for this file is removed.
pub fn process_file(
    ctx: &FilterContext,
    file: &FileFrameCounts,
    video: &[VideoAnnotation],
    audio: &[AudioAnnotation],
) -> Result<FileOutput> {
    let filename = file.filename.as_str();
    let settings = &ctx.settings;

    validate_frame_counts(filename, &file.counts)?;

    let segments = find_segments(&file.counts, settings.max_vehicles, settings.min_duration);
    debug!(
        "{filename}: {} frames, {} segment(s)",
        file.counts.len(),
        segments.len()
    );

    if segments.is_empty() {
        return Ok(FileOutput::default());
    }

    let media = match ctx.clipper {
        Some(ref clipper) => Some(SourceMedia::open(ctx, filename, clipper)?),
        None => None,
    };

    let mut clips = WrittenClips::new();
    let mut output = FileOutput::default();

    for (index, segment) in segments.into_iter().enumerate() {
        let id = segment_id(filename, index);

        let (video_clip, audio_clip) = match media {
            Some(ref media) => {
                let (video_clip, audio_clip) =
                    media.write_clips(&ctx.output, settings.fps, &id, segment, &mut clips)?;
                (Some(video_clip), Some(audio_clip))
            }
            None => (None, None),
        };

        let Projection {
            video: mut segment_video,
            audio: mut segment_audio,
        } = project(segment, filename, video, audio);

        if settings.audio_time_base == AudioTimeBase::Segment {
            rebase_audio(&mut segment_audio, segment);
        }
        relabel(&mut segment_video, &id);
        relabel(&mut segment_audio, &id);

        output.entries.push(SegmentEntry {
            id,
            source_file: filename.to_string(),
            segment,
            start_time: segment.start_time(),
            end_time: segment.end_time(),
            video_annotations: segment_video.len(),
            audio_annotations: segment_audio.len(),
            video_clip,
            audio_clip,
        });
        output.video.extend(segment_video);
        output.audio.extend(segment_audio);
    }

    if !clips.is_empty() {
        info!("{filename}: wrote {} clip(s)", clips.len());
    }
    clips.keep();

    Ok(output)
}

/// Source media of one recording, with the audio decoded once.
struct SourceMedia<'a> {
    clipper: &'a VideoClipper,
    video_path: PathBuf,
    audio: DecodedAudio,
}

impl<'a> SourceMedia<'a> {
    fn open(ctx: &FilterContext, filename: &str, clipper: &'a VideoClipper) -> Result<Self> {
        let video_path = ctx.input.video_path(filename, ctx.settings.fps);
        ensure_exists(filename, &video_path)?;

        let audio_path = ctx.input.audio_path(filename);
        ensure_exists(filename, &audio_path)?;

        debug!("Decoding {}", audio_path.display());
        let mut audio = decode_audio_file(&audio_path)?;
        debug!(
            "Decoded {:.1}s of audio at {} Hz",
            audio.duration_secs(),
            audio.sample_rate
        );
        if let Some(rate) = ctx.settings.audio_sample_rate {
            debug!("Resampling from {} Hz to {rate} Hz", audio.sample_rate);
            audio = resample_audio(audio, rate)?;
        }

        Ok(Self {
            clipper,
            video_path,
            audio,
        })
    }

    /// Write the video and audio clip of one segment.
    fn write_clips(
        &self,
        output: &DatasetLayout,
        fps: u32,
        id: &str,
        segment: Segment,
        clips: &mut WrittenClips,
    ) -> Result<(PathBuf, PathBuf)> {
        let (start_time, end_time) = (segment.start_time(), segment.end_time());

        // ffmpeg may leave a truncated file behind on failure
        let video_clip = output.video_path(id, fps);
        clips.record(&video_clip);
        self.clipper
            .extract_clip(&self.video_path, &video_clip, start_time, end_time)?;

        let audio_clip = output.audio_path(id);
        clips.record(&audio_clip);
        let samples = slice_seconds(
            &self.audio.samples,
            self.audio.sample_rate,
            start_time,
            end_time,
        );
        write_wav(&audio_clip, samples, self.audio.sample_rate)?;

        Ok((video_clip, audio_clip))
    }
}

fn ensure_exists(filename: &str, path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::SourceMediaNotFound {
            filename: filename.to_string(),
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::config::VideoStrategy;
    use crate::pipeline::{FilterSettings, prepare_output_layout};
    use crate::segment::{FrameCount, framewise_counts};
    use tempfile::TempDir;

    fn settings(root: &Path, annotations_only: bool) -> FilterSettings {
        FilterSettings {
            max_vehicles: 2,
            min_duration: 1.0,
            fps: 8,
            input_root: root.join("in"),
            output_root: root.join("out"),
            ffmpeg: PathBuf::from("/nonexistent/bin/ffmpeg"),
            video_strategy: VideoStrategy::Reencode,
            audio_sample_rate: None,
            audio_time_base: AudioTimeBase::Absolute,
            annotations_only,
        }
    }

    fn video_rows(filename: &str, counts: &[u32]) -> Vec<VideoAnnotation> {
        let mut rows = Vec::new();
        for (frame_id, &count) in (0u32..).zip(counts) {
            for object in 0..count {
                rows.push(VideoAnnotation {
                    filename: filename.to_string(),
                    frame_id,
                    time: VideoAnnotation::frame_time(frame_id),
                    attributes: vec!["car".to_string(), object.to_string()],
                });
            }
        }
        rows
    }

    fn audio_row(filename: &str, start: f64, end: f64) -> AudioAnnotation {
        AudioAnnotation {
            filename: filename.to_string(),
            start,
            end,
            attributes: vec!["car".to_string()],
        }
    }

    #[test]
    fn test_process_file_annotations_only() {
        let dir = TempDir::new().unwrap();
        let ctx = FilterContext::new(settings(dir.path(), true));

        // frames 0-4 quiet, frame 5 busy, frames 6-7 quiet
        let video = video_rows("street", &[1, 1, 2, 1, 1, 3, 1, 1]);
        let audio = vec![audio_row("street", 1.5, 3.5), audio_row("street", 3.2, 3.4)];
        let counts = framewise_counts(&video);

        let output = process_file(&ctx, &counts[0], &video, &audio).unwrap();

        assert_eq!(output.segments(), 1);
        let entry = &output.entries[0];
        assert_eq!(entry.id, "street_0");
        assert_eq!(entry.segment, Segment::new(0, 4));
        assert!(entry.video_clip.is_none());

        assert_eq!(output.video.len(), 6);
        assert!(output.video.iter().all(|row| row.filename == "street_0"));

        assert_eq!(output.audio.len(), 1);
        assert_eq!(output.audio[0].start, 1.5);
        assert_eq!(output.audio[0].end, 2.0);
        assert_eq!(entry.audio_annotations, 1);
    }

    #[test]
    fn test_process_file_rebases_audio_when_requested() {
        let dir = TempDir::new().unwrap();
        let mut settings = settings(dir.path(), true);
        settings.audio_time_base = AudioTimeBase::Segment;
        let ctx = FilterContext::new(settings);

        let video = video_rows("street", &[3, 1, 1, 1, 1]);
        let audio = vec![audio_row("street", 0.0, 1.0)];
        let counts = framewise_counts(&video);

        let output = process_file(&ctx, &counts[0], &video, &audio).unwrap();

        assert_eq!(output.entries[0].segment, Segment::new(1, 4));
        assert_eq!(output.audio[0].start, 0.0);
        assert_eq!(output.audio[0].end, 0.5);
    }

    #[test]
    fn test_process_file_without_segments_skips_media() {
        let dir = TempDir::new().unwrap();
        // media mode, but no source media exists
        let ctx = FilterContext::new(settings(dir.path(), false));

        let video = video_rows("busy", &[3, 3, 3, 3]);
        let counts = framewise_counts(&video);

        let output = process_file(&ctx, &counts[0], &video, &[]).unwrap();
        assert_eq!(output.segments(), 0);
        assert!(output.video.is_empty());
    }

    #[test]
    fn test_process_file_rejects_gaps() {
        let dir = TempDir::new().unwrap();
        let ctx = FilterContext::new(settings(dir.path(), true));
        let file = FileFrameCounts {
            filename: "street".to_string(),
            counts: vec![
                FrameCount { frame_id: 0, count: 1 },
                FrameCount { frame_id: 2, count: 1 },
            ],
        };

        let result = process_file(&ctx, &file, &[], &[]);
        assert!(matches!(result, Err(Error::MalformedFrameCounts { .. })));
    }

    #[test]
    fn test_process_file_reports_missing_media() {
        let dir = TempDir::new().unwrap();
        let ctx = FilterContext::new(settings(dir.path(), false));

        let video = video_rows("street", &[1, 1, 1, 1, 1]);
        let counts = framewise_counts(&video);

        let result = process_file(&ctx, &counts[0], &video, &[]);
        assert!(matches!(result, Err(Error::SourceMediaNotFound { .. })));
    }

    #[test]
    fn test_failed_file_leaves_no_clips() {
        let dir = TempDir::new().unwrap();
        let ctx = FilterContext::new(settings(dir.path(), false));
        prepare_output_layout(&ctx.output, 8, true).unwrap();

        std::fs::create_dir_all(ctx.input.video_dir(8)).unwrap();
        std::fs::create_dir_all(ctx.input.audio_dir()).unwrap();
        std::fs::write(ctx.input.video_path("street", 8), b"not a video").unwrap();
        write_wav(&ctx.input.audio_path("street"), &vec![0.1; 8000 * 4], 8000).unwrap();

        let video = video_rows("street", &[1, 1, 1, 1, 1]);
        let counts = framewise_counts(&video);

        let result = process_file(&ctx, &counts[0], &video, &[]);
        assert!(matches!(result, Err(Error::FfmpegNotFound { .. })));

        assert!(!ctx.output.video_path("street_0", 8).exists());
        assert!(!ctx.output.audio_path("street_0").exists());
    }
}
