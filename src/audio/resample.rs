//! Audio resampling using rubato.

use crate::error::{Error, Result};
use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};

use super::DecodedAudio;

const CHUNK_SIZE: usize = 1024;
const CHANNELS: usize = 1;

/// Resample decoded audio to `to_rate`.
///
/// Returns the input unchanged if already at the target rate.
pub fn resample_audio(audio: DecodedAudio, to_rate: u32) -> Result<DecodedAudio> {
    if audio.sample_rate == to_rate {
        return Ok(audio);
    }

    Ok(DecodedAudio {
        samples: resample(&audio.samples, audio.sample_rate, to_rate)?,
        sample_rate: to_rate,
    })
}

/// Resample mono samples from `from_rate` to `to_rate`.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate {
        return Ok(samples.to_vec());
    }

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        1,
        CHANNELS,
        FixedSync::Both,
    )
    .map_err(|e| Error::Resample {
        reason: e.to_string(),
    })?;

    let frames_needed = resampler.input_frames_next();
    let delay = resampler.output_delay();
    let expected = output_len(samples.len(), from_rate, to_rate);
    let mut output = Vec::with_capacity(expected + delay + CHUNK_SIZE);

    let mut chunks = samples.chunks_exact(frames_needed);
    for chunk in &mut chunks {
        output.extend_from_slice(&process_chunk(&mut resampler, chunk, frames_needed)?);
    }

    // Zero-pad the tail, then keep flushing until the delayed output is complete
    let mut padded = vec![0.0; frames_needed];
    let tail = chunks.remainder();
    if !tail.is_empty() {
        padded[..tail.len()].copy_from_slice(tail);
        output.extend_from_slice(&process_chunk(&mut resampler, &padded, frames_needed)?);
        padded.fill(0.0);
    }
    while output.len() < expected + delay {
        output.extend_from_slice(&process_chunk(&mut resampler, &padded, frames_needed)?);
    }

    output.drain(..delay);
    output.truncate(expected);

    Ok(output)
}

fn process_chunk(resampler: &mut Fft<f32>, chunk: &[f32], frames: usize) -> Result<Vec<f32>> {
    let input = SequentialSlice::new(chunk, CHANNELS, frames).map_err(|e| Error::Resample {
        reason: format!("failed to create input adapter: {e}"),
    })?;

    let resampled = resampler
        .process(&input, 0, None)
        .map_err(|e| Error::Resample {
            reason: e.to_string(),
        })?;

    Ok(resampled.take_data())
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn output_len(input_len: usize, from_rate: u32, to_rate: u32) -> usize {
    ((input_len as f64) * f64::from(to_rate) / f64::from(from_rate)).ceil() as usize
}
