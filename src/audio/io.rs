//! WAV file I/O
//!
//! Imports and exports PCM WAV audio. All imported audio is converted to the
//! internal 44.1kHz 32-bit float format; sample rate conversion uses linear
//! interpolation. Export writes 16-bit PCM, matching the original app's
//! output format.

use std::io::{Cursor, Read};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::audio::buffer::{AudioBuffer, ChannelLayout, INTERNAL_SAMPLE_RATE};
use crate::error::{EntrainError, Result};

/// Import a WAV file and convert to the internal format
///
/// # Errors
/// * `FileNotFound` - if the file does not exist
/// * `Format` - if the file is not a valid WAV file
/// * `UnsupportedFormat` - for more than 2 channels or unknown bit depths
pub fn import_wav(path: &Path) -> Result<AudioBuffer> {
    if !path.exists() {
        return Err(EntrainError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let reader = WavReader::open(path).map_err(|e| EntrainError::Format {
        reason: format!("failed to open WAV file: {}", e),
        source: Some(Box::new(e)),
    })?;

    buffer_from_reader(reader)
}

/// Decode in-memory WAV bytes (e.g. a speech-adapter response) to a buffer
pub fn decode_wav(bytes: &[u8]) -> Result<AudioBuffer> {
    let reader = WavReader::new(Cursor::new(bytes)).map_err(|e| EntrainError::Format {
        reason: format!("failed to parse WAV data: {}", e),
        source: Some(Box::new(e)),
    })?;

    buffer_from_reader(reader)
}

/// Export an AudioBuffer to a 16-bit PCM WAV file
///
/// Samples are clamped to [-1.0, 1.0] before quantization.
pub fn export_wav(buffer: &AudioBuffer, path: &Path) -> Result<()> {
    let spec = WavSpec {
        channels: buffer.num_channels() as u16,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(wav_write_error)?;

    for sample in buffer.to_interleaved() {
        let scaled = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
        writer.write_sample(scaled).map_err(wav_write_error)?;
    }

    writer.finalize().map_err(wav_write_error)?;
    Ok(())
}

fn wav_write_error(e: hound::Error) -> EntrainError {
    EntrainError::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
}

fn buffer_from_reader<R: Read>(reader: WavReader<R>) -> Result<AudioBuffer> {
    let spec = reader.spec();
    let channels = spec.channels as usize;
    let source_rate = spec.sample_rate;

    let layout = ChannelLayout::from_count(channels).ok_or_else(|| {
        EntrainError::UnsupportedFormat {
            format: format!("{}-channel audio (only mono/stereo supported)", channels),
        }
    })?;

    let samples = read_samples_as_f32(reader, spec.bits_per_sample, spec.sample_format)?;
    let buffer = AudioBuffer::from_interleaved(&samples, layout, source_rate)?;

    if source_rate == INTERNAL_SAMPLE_RATE {
        return Ok(buffer);
    }

    // Resample each channel to the internal rate
    let ratio = INTERNAL_SAMPLE_RATE as f64 / source_rate as f64;
    let resampled: Vec<Vec<f32>> = (0..buffer.num_channels())
        .map(|ch| resample_linear(buffer.channel(ch), ratio))
        .collect();
    AudioBuffer::from_channels(resampled, INTERNAL_SAMPLE_RATE)
}

/// Read samples from a WAV reader and convert to f32 in [-1.0, 1.0]
fn read_samples_as_f32<R: Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f32>> {
    fn collect<R: Read, S, F>(reader: &mut WavReader<R>, convert: F) -> Result<Vec<f32>>
    where
        S: hound::Sample,
        F: Fn(S) -> f32,
    {
        reader
            .samples::<S>()
            .map(|s| s.map(&convert))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(|e| EntrainError::Format {
                reason: format!("failed to read samples: {}", e),
                source: Some(Box::new(e)),
            })
    }

    match sample_format {
        SampleFormat::Float => collect(&mut reader, |v: f32| v),
        SampleFormat::Int => match bits_per_sample {
            8 => collect(&mut reader, |v: i8| v as f32 / 128.0),
            16 => collect(&mut reader, |v: i16| v as f32 / 32768.0),
            // 24-bit stored as i32 in hound
            24 => collect(&mut reader, |v: i32| v as f32 / 8_388_608.0),
            32 => collect(&mut reader, |v: i32| v as f32 / 2_147_483_648.0),
            _ => Err(EntrainError::UnsupportedFormat {
                format: format!("{}-bit integer audio", bits_per_sample),
            }),
        },
    }
}

/// Linear interpolation resampling
fn resample_linear(samples: &[f32], ratio: f64) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }

    let source_len = samples.len();
    let target_len = ((source_len as f64) * ratio).ceil() as usize;
    let mut output = Vec::with_capacity(target_len);

    for i in 0..target_len {
        let src_pos = i as f64 / ratio;
        let src_idx = src_pos.floor() as usize;
        let frac = (src_pos - src_idx as f64) as f32;

        let sample = if src_idx + 1 < source_len {
            samples[src_idx] * (1.0 - frac) + samples[src_idx + 1] * frac
        } else if src_idx < source_len {
            samples[src_idx]
        } else {
            0.0
        };

        output.push(sample);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{ToneGenerator, ToneSpec};
    use tempfile::tempdir;

    #[test]
    fn test_round_trip_mono() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");

        let original = ToneGenerator::generate(&ToneSpec::new(440, 500)).unwrap();
        export_wav(&original, &path).unwrap();
        let imported = import_wav(&path).unwrap();

        assert_eq!(imported.num_channels(), 1);
        assert_eq!(imported.len(), original.len());
        assert_eq!(imported.sample_rate(), INTERNAL_SAMPLE_RATE);

        for (orig, imp) in original.channel(0).iter().zip(imported.channel(0)) {
            // 16-bit quantization error
            assert!((orig - imp).abs() < 0.001, "sample mismatch: {} vs {}", orig, imp);
        }
    }

    #[test]
    fn test_decode_wav_matches_file_import() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");

        let original = ToneGenerator::generate(&ToneSpec::new(220, 200)).unwrap();
        export_wav(&original, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let from_bytes = decode_wav(&bytes).unwrap();
        let from_file = import_wav(&path).unwrap();

        assert_eq!(from_bytes, from_file);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_wav(Path::new("/nonexistent/audio.wav"));
        assert!(matches!(result, Err(EntrainError::FileNotFound { .. })));
    }

    #[test]
    fn test_decode_garbage_is_format_error() {
        let result = decode_wav(b"definitely not a wav file");
        assert!(matches!(result, Err(EntrainError::Format { .. })));
    }

    #[test]
    fn test_resample_linear_upsample() {
        let samples = vec![0.0, 1.0, 0.0];
        let resampled = resample_linear(&samples, 2.0);

        assert!(resampled.len() >= 5);
        // At index 1 (source position 0.5), expect the midpoint
        assert!((resampled[1] - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_resample_linear_downsample() {
        let samples = vec![0.0, 0.5, 1.0, 0.5, 0.0, -0.5, -1.0, -0.5];
        let resampled = resample_linear(&samples, 0.5);
        assert_eq!(resampled.len(), 4);
    }
}
