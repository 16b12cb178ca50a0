//! Annotation table parsing.
//!
//! Reads the dataset's video and audio annotation CSV files. Only the key
//! columns are interpreted; every other column is carried through verbatim
//! so the filtered tables keep the original schema.

use std::path::Path;

use csv::StringRecord;

use crate::Error;
use crate::constants::columns;

use super::{AnnotationTable, AudioAnnotation, VideoAnnotation};

/// Parse the video annotation table.
///
/// Required columns: `filename`, `frame_id`. A missing or empty `time` value
/// is derived from the frame id; a missing `time` column is appended to the
/// headers so the filtered table always carries one.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - A required column is missing
/// - A frame id is not a non-negative integer or a time is not a number
pub fn read_video_annotations(path: &Path) -> Result<AnnotationTable<VideoAnnotation>, Error> {
    let mut reader = open_reader(path)?;
    let mut headers = read_headers(&mut reader, path)?;

    let filename_idx = require_column(&headers, columns::FILENAME, path)?;
    let frame_idx = require_column(&headers, columns::FRAME_ID, path)?;
    let time_idx = find_column(&headers, columns::TIME);
    let key_indices: Vec<usize> = [Some(filename_idx), Some(frame_idx), time_idx]
        .into_iter()
        .flatten()
        .collect();

    let mut rows = Vec::new();

    for (line_num, result) in reader.records().enumerate() {
        let line = line_num + 2;
        let record = result.map_err(|e| Error::InvalidAnnotationFormat {
            path: path.to_path_buf(),
            message: format!("line {line}: {e}"),
        })?;

        let frame_id = parse_frame_id(field(&record, frame_idx)).map_err(|message| {
            Error::InvalidAnnotationFormat {
                path: path.to_path_buf(),
                message: format!("line {line}: {message}"),
            }
        })?;

        let time = match time_idx.map(|idx| field(&record, idx)) {
            Some(value) if !value.is_empty() => {
                parse_seconds(value, columns::TIME).map_err(|message| {
                    Error::InvalidAnnotationFormat {
                        path: path.to_path_buf(),
                        message: format!("line {line}: {message}"),
                    }
                })?
            }
            _ => VideoAnnotation::frame_time(frame_id),
        };

        rows.push(VideoAnnotation {
            filename: field(&record, filename_idx).to_string(),
            frame_id,
            time,
            attributes: attributes(&record, &key_indices),
        });
    }

    if time_idx.is_none() {
        headers.push(columns::TIME.to_string());
    }

    Ok(AnnotationTable { headers, rows })
}

/// Parse the audio annotation table.
///
/// Required columns: `filename`, `start`, `end`.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - A required column is missing
/// - A time value cannot be parsed or `end` precedes `start`
pub fn read_audio_annotations(path: &Path) -> Result<AnnotationTable<AudioAnnotation>, Error> {
    let mut reader = open_reader(path)?;
    let headers = read_headers(&mut reader, path)?;

    let filename_idx = require_column(&headers, columns::FILENAME, path)?;
    let start_idx = require_column(&headers, columns::START, path)?;
    let end_idx = require_column(&headers, columns::END, path)?;
    let key_indices = [filename_idx, start_idx, end_idx];

    let mut rows = Vec::new();

    for (line_num, result) in reader.records().enumerate() {
        let line = line_num + 2;
        let invalid = |message: String| Error::InvalidAnnotationFormat {
            path: path.to_path_buf(),
            message: format!("line {line}: {message}"),
        };

        let record = result.map_err(|e| invalid(e.to_string()))?;
        let start = parse_seconds(field(&record, start_idx), columns::START).map_err(invalid)?;
        let end = parse_seconds(field(&record, end_idx), columns::END).map_err(invalid)?;

        if end < start {
            return Err(invalid(format!(
                "end time ({end}) must not precede start time ({start})"
            )));
        }

        rows.push(AudioAnnotation {
            filename: field(&record, filename_idx).to_string(),
            start,
            end,
            attributes: attributes(&record, &key_indices),
        });
    }

    Ok(AnnotationTable { headers, rows })
}

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>, Error> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| Error::AnnotationRead {
            path: path.to_path_buf(),
            source: e,
        })
}

fn read_headers(reader: &mut csv::Reader<std::fs::File>, path: &Path) -> Result<Vec<String>, Error> {
    let headers = reader.headers().map_err(|e| Error::AnnotationRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(headers.iter().map(str::to_string).collect())
}

fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn require_column(headers: &[String], name: &'static str, path: &Path) -> Result<usize, Error> {
    find_column(headers, name).ok_or_else(|| Error::MissingColumn {
        path: path.to_path_buf(),
        column: name,
    })
}

/// Key field value; surrounding whitespace is not part of a key.
fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).map_or("", str::trim)
}

fn attributes(record: &StringRecord, key_indices: &[usize]) -> Vec<String> {
    record
        .iter()
        .enumerate()
        .filter(|(idx, _)| !key_indices.contains(idx))
        .map(|(_, value)| value.to_string())
        .collect()
}

/// Parse a frame id, accepting integral floats such as `12.0`.
fn parse_frame_id(value: &str) -> Result<u32, String> {
    if let Ok(id) = value.parse::<u32>() {
        return Ok(id);
    }

    let float: f64 = value
        .parse()
        .map_err(|_| format!("frame_id '{value}' is not a number"))?;

    if !float.is_finite() || float < 0.0 || float.fract() != 0.0 || float > f64::from(u32::MAX) {
        return Err(format!("frame_id '{value}' is not a non-negative integer"));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(float as u32)
}

fn parse_seconds(value: &str, column: &str) -> Result<f64, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("{column} '{value}' is not a number"))?;

    if !seconds.is_finite() {
        return Err(format!("{column} '{value}' is not finite"));
    }

    Ok(seconds)
}
