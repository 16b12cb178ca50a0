//! Processing pipeline components.

mod cleanup;
mod coordinator;
mod layout;
mod processor;
mod scan;

pub use cleanup::WrittenClips;
pub use coordinator::{FilterContext, FilterSettings, prepare_output_layout};
pub use layout::DatasetLayout;
pub use processor::{FileOutput, process_file};
pub use scan::{FileSegments, scan_segments};
