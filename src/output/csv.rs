//! CSV output for filtered annotation tables.

use crate::annotations::Annotation;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use std::fs::File;
use std::path::{Path, PathBuf};

/// CSV annotation writer that keeps the source table's column order.
pub struct CsvWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
    headers: Vec<String>,
}

impl CsvWriter {
    /// Create a new CSV writer with the given column order.
    pub fn new(path: &Path, headers: Vec<String>) -> Result<Self> {
        let writer = csv::Writer::from_path(path).map_err(|e| Error::AnnotationWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            writer,
            path: path.to_path_buf(),
            headers,
        })
    }

    fn write_fields(&mut self, fields: &[String]) -> Result<()> {
        self.writer
            .write_record(fields)
            .map_err(|e| Error::AnnotationWrite {
                path: self.path.clone(),
                source: e,
            })
    }
}

impl<T: Annotation> OutputWriter<T> for CsvWriter {
    fn write_header(&mut self) -> Result<()> {
        let headers = self.headers.clone();
        self.write_fields(&headers)
    }

    fn write_row(&mut self, row: &T) -> Result<()> {
        let fields = render_row(&self.headers, row);
        self.write_fields(&fields)
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Lay out a row's values in header order.
///
/// Key columns are rendered from the typed fields, every other column takes
/// the next attribute value.
fn render_row<T: Annotation>(headers: &[String], row: &T) -> Vec<String> {
    let mut attributes = row.attributes().iter();
    headers
        .iter()
        .map(|header| {
            if T::KEY_COLUMNS.contains(&header.as_str()) {
                row.key_value(header).unwrap_or_default()
            } else {
                attributes.next().cloned().unwrap_or_default()
            }
        })
        .collect()
}
