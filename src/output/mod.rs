//! Output writers and progress reporting.

mod csv;
mod manifest;
pub mod progress;
mod writer;

pub use csv::CsvWriter;
pub use manifest::{
    ManifestSettings, ManifestSummary, SegmentEntry, SegmentManifest, write_manifest,
};
pub use writer::{OutputWriter, write_all};
