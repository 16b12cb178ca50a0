//! Annotation record and table types.

use std::collections::HashMap;

use crate::constants::{FRAME_INTERVAL_SECS, columns};

/// Common access to the key columns of an annotation row.
///
/// Key columns are parsed into typed fields; every other column is kept
/// verbatim in [`Annotation::attributes`], in table header order.
pub trait Annotation {
    /// Names of the typed columns, in the order they are looked up.
    const KEY_COLUMNS: &'static [&'static str];

    /// Source file identifier.
    fn filename(&self) -> &str;

    /// Replace the source file identifier.
    fn set_filename(&mut self, filename: String);

    /// Render a key column for output, `None` if `column` is not a key.
    fn key_value(&self, column: &str) -> Option<String>;

    /// Non-key column values in header order.
    fn attributes(&self) -> &[String];
}

/// One object annotation in one video frame.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoAnnotation {
    /// Source file identifier.
    pub filename: String,
    /// Frame index at the fixed annotation rate.
    pub frame_id: u32,
    /// Frame time in seconds.
    pub time: f64,
    /// Remaining object attributes.
    pub attributes: Vec<String>,
}

impl VideoAnnotation {
    /// Time of a frame at the fixed annotation rate.
    pub fn frame_time(frame_id: u32) -> f64 {
        f64::from(frame_id) * FRAME_INTERVAL_SECS
    }
}

impl Annotation for VideoAnnotation {
    const KEY_COLUMNS: &'static [&'static str] =
        &[columns::FILENAME, columns::FRAME_ID, columns::TIME];

    fn filename(&self) -> &str {
        &self.filename
    }

    fn set_filename(&mut self, filename: String) {
        self.filename = filename;
    }

    fn key_value(&self, column: &str) -> Option<String> {
        match column {
            columns::FILENAME => Some(self.filename.clone()),
            columns::FRAME_ID => Some(self.frame_id.to_string()),
            columns::TIME => Some(format_seconds(self.time)),
            _ => None,
        }
    }

    fn attributes(&self) -> &[String] {
        &self.attributes
    }
}

/// One labelled sound event interval.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioAnnotation {
    /// Source file identifier.
    pub filename: String,
    /// Event start in seconds.
    pub start: f64,
    /// Event end in seconds.
    pub end: f64,
    /// Remaining label attributes.
    pub attributes: Vec<String>,
}

impl Annotation for AudioAnnotation {
    const KEY_COLUMNS: &'static [&'static str] =
        &[columns::FILENAME, columns::START, columns::END];

    fn filename(&self) -> &str {
        &self.filename
    }

    fn set_filename(&mut self, filename: String) {
        self.filename = filename;
    }

    fn key_value(&self, column: &str) -> Option<String> {
        match column {
            columns::FILENAME => Some(self.filename.clone()),
            columns::START => Some(format_seconds(self.start)),
            columns::END => Some(format_seconds(self.end)),
            _ => None,
        }
    }

    fn attributes(&self) -> &[String] {
        &self.attributes
    }
}

/// A parsed annotation table: header order plus rows.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationTable<T> {
    /// Column names in output order.
    pub headers: Vec<String>,
    /// Rows in source order.
    pub rows: Vec<T>,
}

impl<T: Annotation + Clone> AnnotationTable<T> {
    /// Split rows by source file, keeping table order within each file.
    pub fn group_by_file(&self) -> HashMap<String, Vec<T>> {
        let mut groups: HashMap<String, Vec<T>> = HashMap::new();
        for row in &self.rows {
            groups
                .entry(row.filename().to_string())
                .or_default()
                .push(row.clone());
        }
        groups
    }
}

/// Rename every row to a new file identifier.
pub fn relabel<T: Annotation>(rows: &mut [T], filename: &str) {
    for row in rows {
        row.set_filename(filename.to_string());
    }
}

/// Identifier of the `index`-th segment cut from `filename`.
pub fn segment_id(filename: &str, index: usize) -> String {
    format!("{filename}_{index}")
}

/// Format a time value so whole seconds keep a decimal point (`2.0`, `1.5`).
pub fn format_seconds(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
