//! Mock speech synthesizer
//!
//! Produces a deterministic tone instead of real speech so the composition
//! pipeline can be exercised offline and in tests.

use crate::audio::buffer::AudioBuffer;
use crate::error::{EntrainError, Result};
use crate::speech::{SpeechSynthesizer, Voice};
use crate::synth::{ToneGenerator, ToneSpec};

/// Frequency of the stand-in speech tone
const MOCK_SPEECH_HZ: i32 = 220;

/// Per-character speaking time used when no fixed duration is set
const MS_PER_CHAR: i64 = 60;

/// Deterministic stand-in for a hosted TTS service
#[derive(Debug, Clone, Default)]
pub struct MockSpeech {
    fixed_duration_ms: Option<i64>,
    fail: bool,
}

impl MockSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always return a speech buffer of exactly this duration
    pub fn with_fixed_duration(duration_ms: i64) -> Self {
        Self {
            fixed_duration_ms: Some(duration_ms),
            ..Self::default()
        }
    }

    /// Fail every call with an adapter error
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn duration_for(&self, text: &str) -> i64 {
        self.fixed_duration_ms
            .unwrap_or_else(|| (text.chars().count() as i64 * MS_PER_CHAR).max(200))
    }

    /// RMS level of the raw (unattenuated) mock speech signal, for tests
    pub fn raw_speech_rms(&self) -> f32 {
        // The mock always speaks a full-scale sine
        ToneGenerator::generate(&ToneSpec::new(MOCK_SPEECH_HZ, 1000))
            .expect("mock tone parameters are valid")
            .rms_db()
    }
}

impl SpeechSynthesizer for MockSpeech {
    fn synthesize(&self, text: &str, _voice: &str) -> Result<AudioBuffer> {
        if self.fail {
            return Err(EntrainError::adapter("mock synthesizer set to fail"));
        }
        ToneGenerator::generate(&ToneSpec::new(MOCK_SPEECH_HZ, self.duration_for(text)))
    }

    fn list_voices(&self) -> Result<Vec<Voice>> {
        if self.fail {
            return Err(EntrainError::adapter("mock synthesizer set to fail"));
        }
        Ok(vec![
            Voice {
                id: "en-US_AllisonV3Voice".to_string(),
                label: "en-US_AllisonV3Voice (en-US)".to_string(),
            },
            Voice {
                id: "en-GB_KateV3Voice".to_string(),
                label: "en-GB_KateV3Voice (en-GB)".to_string(),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_duration_scales_with_text() {
        let mock = MockSpeech::new();
        let short = mock.synthesize("hi", "v").unwrap();
        let long = mock.synthesize("a much longer affirmation text", "v").unwrap();
        assert!(long.len() > short.len());
    }

    #[test]
    fn test_mock_fixed_duration() {
        let mock = MockSpeech::with_fixed_duration(2000);
        let speech = mock.synthesize("anything at all", "v").unwrap();
        assert_eq!(speech.duration_ms(), 2000);
    }

    #[test]
    fn test_mock_is_deterministic() {
        let mock = MockSpeech::new();
        let a = mock.synthesize("I am calm", "v").unwrap();
        let b = mock.synthesize("I am calm", "v").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_failing_mock() {
        let mock = MockSpeech::failing();
        assert!(matches!(
            mock.synthesize("x", "v"),
            Err(EntrainError::Adapter { .. })
        ));
        assert!(mock.list_voices().is_err());
    }

    #[test]
    fn test_mock_voice_catalog() {
        let voices = MockSpeech::new().list_voices().unwrap();
        assert_eq!(voices.len(), 2);
        assert!(voices[0].label.contains(&voices[0].id));
    }
}
