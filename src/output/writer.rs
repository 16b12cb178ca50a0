//! Output writer trait definition.

use crate::error::Result;

/// Trait for writing filtered annotation rows.
pub trait OutputWriter<T> {
    /// Write the file header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single row.
    fn write_row(&mut self, row: &T) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}

/// Write a header, every row, and finalize.
pub fn write_all<T, W: OutputWriter<T>>(writer: &mut W, rows: &[T]) -> Result<()> {
    writer.write_header()?;
    for row in rows {
        writer.write_row(row)?;
    }
    writer.finalize()
}
