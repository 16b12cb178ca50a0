//! Annotation tables of the audio-video dataset.
//!
//! Video annotations describe objects per frame, audio annotations describe
//! labelled sound events as time intervals. Both are read from CSV and keep
//! their non-key columns untouched.

mod reader;
mod types;

pub use reader::{read_audio_annotations, read_video_annotations};
pub use types::{
    Annotation, AnnotationTable, AudioAnnotation, VideoAnnotation, format_seconds, relabel,
    segment_id,
};
