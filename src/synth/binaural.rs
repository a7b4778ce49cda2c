//! Binaural beat mixing
//!
//! A binaural beat is perceived when each ear receives a tone at a slightly
//! different frequency, so the two tones are kept on separate stereo
//! channels and are never averaged into mono.

use crate::audio::buffer::AudioBuffer;
use crate::error::Result;
use crate::synth::tone::{ToneGenerator, ToneSpec};

/// Parameters for a binaural beat track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinauralSpec {
    /// Base frequency in Hz (left ear)
    pub base_freq_hz: i32,
    /// Beat frequency in Hz, added to the base for the right ear.
    /// Zero or negative values are accepted; the right channel then simply
    /// matches or falls below the base frequency.
    pub beat_freq_hz: i32,
    /// Duration in milliseconds
    pub duration_ms: i64,
    /// Volume offset in dB applied to the combined buffer
    pub volume_db: f32,
}

impl BinauralSpec {
    pub fn new(base_freq_hz: i32, beat_freq_hz: i32, duration_ms: i64, volume_db: f32) -> Self {
        Self {
            base_freq_hz,
            beat_freq_hz,
            duration_ms,
            volume_db,
        }
    }
}

/// Builds stereo binaural-beat buffers from two independently generated tones
pub struct BinauralMixer;

impl BinauralMixer {
    /// Mix a binaural beat track
    ///
    /// Channel 0 carries the base tone, channel 1 the base+beat tone, and
    /// the volume offset is applied uniformly on the logarithmic scale.
    /// The result always has two channels.
    pub fn mix(spec: &BinauralSpec) -> Result<AudioBuffer> {
        let left = ToneGenerator::generate(&ToneSpec::new(spec.base_freq_hz, spec.duration_ms))?;
        let right = ToneGenerator::generate(&ToneSpec::new(
            spec.base_freq_hz + spec.beat_freq_hz,
            spec.duration_ms,
        ))?;

        let stereo = AudioBuffer::stereo_from_mono(&left, &right)?;
        Ok(stereo.with_gain(spec.volume_db))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntrainError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mix_is_stereo() {
        let buf = BinauralMixer::mix(&BinauralSpec::new(440, 2, 1000, 0.0)).unwrap();
        assert_eq!(buf.num_channels(), 2);
        assert_eq!(buf.duration_ms(), 1000);
    }

    #[test]
    fn test_mix_channels_differ() {
        let buf = BinauralMixer::mix(&BinauralSpec::new(440, 40, 500, 0.0)).unwrap();

        // 440 Hz left vs 480 Hz right diverge quickly
        let diff: f32 = buf
            .channel(0)
            .iter()
            .zip(buf.channel(1))
            .map(|(l, r)| (l - r).abs())
            .sum();
        assert!(diff > 1.0, "channels should carry different tones");
    }

    #[test]
    fn test_mix_volume_offset() {
        let loud = BinauralMixer::mix(&BinauralSpec::new(440, 2, 1000, 0.0)).unwrap();
        let quiet = BinauralMixer::mix(&BinauralSpec::new(440, 2, 1000, -15.0)).unwrap();

        assert_abs_diff_eq!(quiet.rms_db(), loud.rms_db() - 15.0, epsilon = 0.05);
    }

    #[test]
    fn test_mix_zero_beat_gives_identical_channels() {
        let buf = BinauralMixer::mix(&BinauralSpec::new(440, 0, 500, 0.0)).unwrap();
        assert_eq!(buf.channel(0), buf.channel(1));
    }

    #[test]
    fn test_mix_negative_beat_is_accepted() {
        // Right channel lands below the base; never rejected on its own
        let buf = BinauralMixer::mix(&BinauralSpec::new(440, -10, 500, 0.0)).unwrap();
        assert_eq!(buf.num_channels(), 2);
    }

    #[test]
    fn test_mix_beat_below_zero_total_fails() {
        let result = BinauralMixer::mix(&BinauralSpec::new(10, -50, 500, 0.0));
        assert!(matches!(
            result,
            Err(EntrainError::InvalidParameter { .. })
        ));
    }
}
