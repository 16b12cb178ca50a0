//! Audio clip slicing and WAV writing.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::{Error, Result};

/// Slice the samples between two times in seconds.
///
/// Sample indices are truncated toward zero and clamped to the buffer, so a
/// window reaching past the end of the recording yields a shorter clip.
pub fn slice_seconds(samples: &[f32], sample_rate: u32, start_time: f64, end_time: f64) -> &[f32] {
    let start = sample_index(start_time, sample_rate).min(samples.len());
    let end = sample_index(end_time, sample_rate).clamp(start, samples.len());
    &samples[start..end]
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sample_index(time: f64, sample_rate: u32) -> usize {
    (time.max(0.0) * f64::from(sample_rate)) as usize
}

/// Write mono samples to a 16-bit PCM WAV file.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let wav_error = |e: hound::Error| Error::WavWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let mut writer = WavWriter::create(path, spec).map_err(wav_error)?;

    for &sample in samples {
        #[allow(clippy::cast_possible_truncation)]
        let sample_i16 = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer.write_sample(sample_i16).map_err(wav_error)?;
    }

    writer.finalize().map_err(wav_error)
}
