//! Framewise object counts.

use std::collections::{BTreeMap, HashMap};

use crate::Error;
use crate::annotations::VideoAnnotation;

use super::FrameCount;

/// Ordered frame counts of one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFrameCounts {
    /// Source file identifier.
    pub filename: String,
    /// Counts sorted by frame id.
    pub counts: Vec<FrameCount>,
}

/// Count annotation rows per `(filename, frame_id)`.
///
/// Files are returned in order of first appearance in `rows`; frames within a
/// file are sorted ascending. Only frames with at least one row appear.
pub fn framewise_counts(rows: &[VideoAnnotation]) -> Vec<FileFrameCounts> {
    let mut order: Vec<&str> = Vec::new();
    let mut per_file: HashMap<&str, BTreeMap<u32, u32>> = HashMap::new();

    for row in rows {
        let frames = per_file.entry(row.filename.as_str()).or_insert_with(|| {
            order.push(row.filename.as_str());
            BTreeMap::new()
        });
        *frames.entry(row.frame_id).or_insert(0) += 1;
    }

    order
        .into_iter()
        .map(|filename| {
            let counts = per_file
                .remove(filename)
                .unwrap_or_default()
                .into_iter()
                .map(|(frame_id, count)| FrameCount { frame_id, count })
                .collect();
            FileFrameCounts {
                filename: filename.to_string(),
                counts,
            }
        })
        .collect()
}

/// Check that frame ids increase by exactly one from row to row.
///
/// # Errors
///
/// Returns [`Error::MalformedFrameCounts`] naming the first frame that is out
/// of order or follows a gap.
pub fn validate_frame_counts(filename: &str, counts: &[FrameCount]) -> Result<(), Error> {
    for pair in counts.windows(2) {
        let (prev, next) = (pair[0].frame_id, pair[1].frame_id);
        if next <= prev {
            return Err(Error::MalformedFrameCounts {
                filename: filename.to_string(),
                message: format!("frame {next} follows frame {prev}"),
            });
        }
        if next - prev != 1 {
            return Err(Error::MalformedFrameCounts {
                filename: filename.to_string(),
                message: format!("frames {} to {} are missing", prev + 1, next - 1),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(filename: &str, frame_id: u32) -> VideoAnnotation {
        VideoAnnotation {
            filename: filename.to_string(),
            frame_id,
            time: VideoAnnotation::frame_time(frame_id),
            attributes: Vec::new(),
        }
    }

    fn fc(frame_id: u32, count: u32) -> FrameCount {
        FrameCount { frame_id, count }
    }

    #[test]
    fn test_counts_rows_per_frame_in_file_order() {
        let rows = vec![
            row("b", 1),
            row("a", 0),
            row("b", 0),
            row("b", 1),
            row("a", 1),
            row("b", 1),
        ];

        let counts = framewise_counts(&rows);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].filename, "b");
        assert_eq!(counts[0].counts, vec![fc(0, 1), fc(1, 3)]);
        assert_eq!(counts[1].filename, "a");
        assert_eq!(counts[1].counts, vec![fc(0, 1), fc(1, 1)]);
    }

    #[test]
    fn test_validate_accepts_contiguous() {
        let counts = vec![fc(4, 0), fc(5, 2), fc(6, 1)];
        assert!(validate_frame_counts("a", &counts).is_ok());
        assert!(validate_frame_counts("a", &[]).is_ok());
    }

    #[test]
    fn test_validate_rejects_gap() {
        let counts = vec![fc(0, 0), fc(1, 0), fc(4, 0)];
        let err = validate_frame_counts("a", &counts).unwrap_err();
        assert!(err.to_string().contains("frames 2 to 3 are missing"));
    }

    #[test]
    fn test_validate_rejects_unsorted() {
        let counts = vec![fc(2, 0), fc(1, 0)];
        assert!(matches!(
            validate_frame_counts("a", &counts),
            Err(Error::MalformedFrameCounts { .. })
        ));
    }
}
