//! Projection of annotations onto an extracted segment.

use crate::annotations::{AudioAnnotation, VideoAnnotation};

use super::Segment;

/// Annotations of one file restricted to one segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    /// Video annotations rebased to segment-local frames and times.
    pub video: Vec<VideoAnnotation>,
    /// Audio annotations clipped to the segment's absolute time window.
    pub audio: Vec<AudioAnnotation>,
}

/// Select the annotations of `filename` that belong to `segment`.
///
/// Video rows are rebased so the segment's first frame becomes frame 0 and
/// their time is recomputed from the rebased frame. Audio rows are clipped to
/// the segment window but keep absolute file times.
pub fn project(
    segment: Segment,
    filename: &str,
    video: &[VideoAnnotation],
    audio: &[AudioAnnotation],
) -> Projection {
    Projection {
        video: project_video(segment, filename, video),
        audio: project_audio(segment, filename, audio),
    }
}

/// Rebase the video annotations inside `segment` to segment-local frames.
pub fn project_video(
    segment: Segment,
    filename: &str,
    rows: &[VideoAnnotation],
) -> Vec<VideoAnnotation> {
    rows.iter()
        .filter(|row| row.filename == filename && segment.contains_frame(row.frame_id))
        .map(|row| {
            let frame_id = row.frame_id - segment.start_frame_id;
            VideoAnnotation {
                frame_id,
                time: VideoAnnotation::frame_time(frame_id),
                ..row.clone()
            }
        })
        .collect()
}

/// Clip the audio annotations touching `segment` to its time window.
///
/// Intervals that only touch the window boundary are kept as zero-length
/// intervals.
pub fn project_audio(
    segment: Segment,
    filename: &str,
    rows: &[AudioAnnotation],
) -> Vec<AudioAnnotation> {
    let start_time = segment.start_time();
    let end_time = segment.end_time();

    rows.iter()
        .filter(|row| row.filename == filename && row.end >= start_time && row.start <= end_time)
        .map(|row| AudioAnnotation {
            start: row.start.max(start_time),
            end: row.end.min(end_time),
            ..row.clone()
        })
        .collect()
}

/// Shift clipped audio annotations so the segment start becomes time 0.
pub fn rebase_audio(rows: &mut [AudioAnnotation], segment: Segment) {
    let offset = segment.start_time();
    for row in rows {
        row.start -= offset;
        row.end -= offset;
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn video(filename: &str, frame_id: u32, label: &str) -> VideoAnnotation {
        VideoAnnotation {
            filename: filename.to_string(),
            frame_id,
            time: 99.0,
            attributes: vec![label.to_string()],
        }
    }

    fn audio(filename: &str, start: f64, end: f64) -> AudioAnnotation {
        AudioAnnotation {
            filename: filename.to_string(),
            start,
            end,
            attributes: vec!["car".to_string()],
        }
    }

    #[test]
    fn test_video_rebased_and_time_recomputed() {
        let rows = vec![
            video("f", 2, "before"),
            video("f", 3, "first"),
            video("f", 6, "last"),
            video("f", 7, "after"),
            video("g", 4, "other file"),
        ];

        let projected = project_video(Segment::new(3, 6), "f", &rows);

        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0].frame_id, 0);
        assert_eq!(projected[0].time, 0.0);
        assert_eq!(projected[0].attributes, vec!["first"]);
        assert_eq!(projected[1].frame_id, 3);
        assert_eq!(projected[1].time, 1.5);
    }

    #[test]
    fn test_audio_clipped_not_rebased() {
        let rows = vec![audio("f", 1.0, 2.0), audio("f", 3.5, 4.0)];

        let projected = project_audio(Segment::new(3, 6), "f", &rows);

        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].start, 1.5);
        assert_eq!(projected[0].end, 2.0);
        assert_eq!(projected[0].attributes, vec!["car"]);
    }

    #[test]
    fn test_audio_spanning_segment_clipped_both_ends() {
        let rows = vec![audio("f", 0.0, 10.0)];
        let projected = project_audio(Segment::new(3, 6), "f", &rows);
        assert_eq!(projected[0].start, 1.5);
        assert_eq!(projected[0].end, 3.0);
    }

    #[test]
    fn test_audio_touching_boundary_is_kept() {
        let rows = vec![audio("f", 0.5, 1.5), audio("f", 3.0, 4.0)];
        let projected = project_audio(Segment::new(3, 6), "f", &rows);

        assert_eq!(projected.len(), 2);
        assert_eq!((projected[0].start, projected[0].end), (1.5, 1.5));
        assert_eq!((projected[1].start, projected[1].end), (3.0, 3.0));
    }

    #[test]
    fn test_project_ignores_other_files() {
        let projection = project(
            Segment::new(0, 4),
            "f",
            &[video("g", 1, "x")],
            &[audio("g", 0.0, 1.0)],
        );
        assert_eq!(projection, Projection::default());
    }

    #[test]
    fn test_rebase_audio() {
        let mut rows = project_audio(Segment::new(3, 6), "f", &[audio("f", 1.0, 2.0)]);
        rebase_audio(&mut rows, Segment::new(3, 6));
        assert_eq!(rows[0].start, 0.0);
        assert_eq!(rows[0].end, 0.5);
    }
}
