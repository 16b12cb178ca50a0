//! Audio decoding, resampling and clip writing.

mod clip;
mod decode;
mod resample;

pub use clip::{slice_seconds, write_wav};
pub use decode::{DecodedAudio, decode_audio_file};
pub use resample::{resample, resample_audio};
