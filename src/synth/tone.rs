//! Sine tone generation

use crate::audio::buffer::{frames_for_ms, AudioBuffer, INTERNAL_SAMPLE_RATE};
use crate::error::{EntrainError, Result};

/// Parameters for a single sine tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneSpec {
    /// Frequency in Hz
    pub frequency_hz: i32,
    /// Duration in milliseconds
    pub duration_ms: i64,
}

impl ToneSpec {
    pub fn new(frequency_hz: i32, duration_ms: i64) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }
}

/// Generates pure sine-wave buffers at the internal sample rate
pub struct ToneGenerator;

impl ToneGenerator {
    /// Generate a mono sine wave for the given spec
    ///
    /// A zero duration yields an empty buffer and a zero frequency yields a
    /// silent one. Negative frequency or duration is a contract violation
    /// and fails with `InvalidParameter`.
    pub fn generate(spec: &ToneSpec) -> Result<AudioBuffer> {
        if spec.frequency_hz < 0 {
            return Err(EntrainError::invalid_parameter(format!(
                "tone frequency must be >= 0 Hz, got {}",
                spec.frequency_hz
            )));
        }
        if spec.duration_ms < 0 {
            return Err(EntrainError::invalid_parameter(format!(
                "tone duration must be >= 0 ms, got {}",
                spec.duration_ms
            )));
        }

        let num_frames = frames_for_ms(spec.duration_ms);
        let angular_freq =
            2.0 * std::f32::consts::PI * spec.frequency_hz as f32 / INTERNAL_SAMPLE_RATE as f32;

        let samples: Vec<f32> = (0..num_frames)
            .map(|i| (angular_freq * i as f32).sin())
            .collect();

        AudioBuffer::from_channels(vec![samples], INTERNAL_SAMPLE_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test_case(440, 1000 ; "one second at 440 Hz")]
    #[test_case(100, 250 ; "quarter second at 100 Hz")]
    #[test_case(600, 10_000 ; "ten seconds at 600 Hz")]
    fn test_generate_duration_is_exact(freq: i32, duration_ms: i64) {
        let tone = ToneGenerator::generate(&ToneSpec::new(freq, duration_ms)).unwrap();
        assert_eq!(tone.duration_ms(), duration_ms);
        assert_eq!(tone.num_channels(), 1);
    }

    #[test]
    fn test_generate_440() {
        let tone = ToneGenerator::generate(&ToneSpec::new(440, 1000)).unwrap();

        // Full-scale sine: RMS ~= -3.01 dB
        assert_abs_diff_eq!(tone.rms_db(), -3.01, epsilon = 0.05);

        // Near the half-cycle the signal crosses zero
        let half_cycle = (INTERNAL_SAMPLE_RATE as f32 / 440.0 / 2.0) as usize;
        assert!(tone.channel(0)[half_cycle].abs() < 0.1);
    }

    #[test]
    fn test_generate_zero_duration() {
        let tone = ToneGenerator::generate(&ToneSpec::new(440, 0)).unwrap();
        assert!(tone.is_empty());
    }

    #[test]
    fn test_generate_zero_frequency_is_silent() {
        let tone = ToneGenerator::generate(&ToneSpec::new(0, 500)).unwrap();
        assert!(!tone.is_empty());
        assert!(tone.channel(0).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_generate_negative_frequency() {
        let result = ToneGenerator::generate(&ToneSpec::new(-440, 1000));
        assert!(matches!(
            result,
            Err(EntrainError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_generate_negative_duration() {
        let result = ToneGenerator::generate(&ToneSpec::new(440, -1));
        assert!(matches!(
            result,
            Err(EntrainError::InvalidParameter { .. })
        ));
    }
}
