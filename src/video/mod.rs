//! Video clip extraction.

mod ffmpeg;

pub use ffmpeg::VideoClipper;
