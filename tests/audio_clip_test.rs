//! Tests for decoding, slicing and writing audio clips.

use hound::{SampleFormat, WavSpec, WavWriter};
use tempfile::TempDir;
use urbansas_filter::audio::{decode_audio_file, resample_audio, slice_seconds, write_wav};

const SAMPLE_RATE: u32 = 8_000;

fn write_stereo_tone(path: &std::path::Path, seconds: u32) {
    let spec = WavSpec {
        channels: 2,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for _ in 0..SAMPLE_RATE * seconds {
        writer.write_sample(8_192i16).unwrap();
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn test_decode_mixes_to_mono() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("street.wav");
    write_stereo_tone(&path, 2);

    let audio = decode_audio_file(&path).unwrap();

    assert_eq!(audio.sample_rate, SAMPLE_RATE);
    assert_eq!(audio.samples.len(), (SAMPLE_RATE * 2) as usize);
    assert!((audio.duration_secs() - 2.0).abs() < 1e-9);
    // (0.25 + 0.0) / 2
    assert!((audio.samples[100] - 0.125).abs() < 1e-3);
}

#[test]
fn test_segment_clip_matches_window_length() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("street.wav");
    write_stereo_tone(&source, 4);
    let audio = decode_audio_file(&source).unwrap();

    let clip = slice_seconds(&audio.samples, audio.sample_rate, 1.5, 3.0);
    let out = dir.path().join("street_0.wav");
    write_wav(&out, clip, audio.sample_rate).unwrap();

    let reader = hound::WavReader::open(&out).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.spec().sample_rate, SAMPLE_RATE);
    assert_eq!(reader.len(), 12_000);
}

#[test]
fn test_window_past_end_is_truncated() {
    let samples = vec![0.0f32; 8_000];
    assert_eq!(slice_seconds(&samples, SAMPLE_RATE, 0.5, 3.0).len(), 4_000);
    assert!(slice_seconds(&samples, SAMPLE_RATE, 2.0, 3.0).is_empty());
}

#[test]
fn test_resampled_clip_uses_target_rate() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("street.wav");
    write_stereo_tone(&source, 2);

    let audio = resample_audio(decode_audio_file(&source).unwrap(), 16_000).unwrap();

    assert_eq!(audio.sample_rate, 16_000);
    let expected = 32_000f64;
    #[allow(clippy::cast_precision_loss)]
    let actual = audio.samples.len() as f64;
    assert!((actual - expected).abs() / expected < 0.05);
}

#[test]
fn test_resampled_clip_stays_aligned_with_window() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("click.wav");
    let spec = WavSpec {
        channels: 1,
        sample_rate: 44_100,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(&source, spec).unwrap();
    for idx in 0..44_100 * 3 {
        // click at 1.5s
        writer
            .write_sample(if idx == 66_150 { i16::MAX } else { 0 })
            .unwrap();
    }
    writer.finalize().unwrap();

    let audio = resample_audio(decode_audio_file(&source).unwrap(), 22_050).unwrap();
    let clip = slice_seconds(&audio.samples, audio.sample_rate, 1.5, 3.0);

    let peak = clip
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
        .map(|(idx, _)| idx)
        .unwrap();
    assert!(peak <= 1, "click landed at sample {peak} of the clip");
    assert_eq!(clip.len(), 33_075);
}
