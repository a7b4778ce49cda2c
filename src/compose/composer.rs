//! Audio composer
//!
//! State-free orchestration of the composition pipeline: binaural overlay
//! first, then the optional attenuated speech overlay. Buffers are never
//! mutated, so a failure at any stage discards only intermediate values.

use log::{debug, warn};

use crate::audio::buffer::AudioBuffer;
use crate::compose::loops::{LoopEngine, LoopSpec};
use crate::error::{ComposeStage, EntrainError, Result};
use crate::speech::SpeechSynthesizer;
use crate::synth::{BinauralMixer, BinauralSpec};

/// Fixed attenuation applied to the speech track before overlay
pub const SPEECH_ATTENUATION_DB: f32 = -30.0;

/// What to do when the speech adapter fails mid-composition
///
/// `Abort` is the default: silently dropping the subliminal track would
/// change what the user receives without telling them. `Skip` logs a
/// warning and returns the binaural-only result for callers that prefer a
/// best-effort output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeechFailurePolicy {
    #[default]
    Abort,
    Skip,
}

/// One conversion action: a base clip plus the overlay parameters
///
/// Built per request and consumed by [`AudioComposer::compose`].
#[derive(Debug, Clone)]
pub struct CompositionRequest {
    /// The base audio clip; its length fixes the output duration
    pub base: AudioBuffer,
    /// Affirmation text to speak over the clip, if any
    pub affirmation: Option<String>,
    /// Voice selector passed to the speech adapter
    pub voice: String,
    /// Base frequency in Hz for the binaural track
    pub base_freq_hz: i32,
    /// Beat frequency in Hz for the binaural track
    pub beat_freq_hz: i32,
    /// Binaural volume offset in dB
    pub volume_db: f32,
    /// Policy for speech-adapter failures
    pub on_speech_failure: SpeechFailurePolicy,
}

impl CompositionRequest {
    pub fn new(base: AudioBuffer, base_freq_hz: i32, beat_freq_hz: i32, volume_db: f32) -> Self {
        Self {
            base,
            affirmation: None,
            voice: String::new(),
            base_freq_hz,
            beat_freq_hz,
            volume_db,
            on_speech_failure: SpeechFailurePolicy::default(),
        }
    }

    /// Add a spoken affirmation overlay in the given voice
    pub fn with_affirmation(mut self, text: impl Into<String>, voice: impl Into<String>) -> Self {
        self.affirmation = Some(text.into());
        self.voice = voice.into();
        self
    }

    /// Override the speech-failure policy
    pub fn on_speech_failure(mut self, policy: SpeechFailurePolicy) -> Self {
        self.on_speech_failure = policy;
        self
    }
}

/// Top-level entry point for audio composition
pub struct AudioComposer;

impl AudioComposer {
    /// Compose the final buffer for `request`
    ///
    /// Steps run in fixed order: size a binaural track to the base clip,
    /// overlay it additively, then (if an affirmation is present)
    /// synthesize speech, attenuate it by [`SPEECH_ATTENUATION_DB`], loop
    /// it to the base duration and overlay that too. Stage failures are
    /// wrapped in [`EntrainError::Stage`]; the caller receives either a
    /// complete buffer or an error, never a partial result.
    pub fn compose(
        request: &CompositionRequest,
        synthesizer: &dyn SpeechSynthesizer,
    ) -> Result<AudioBuffer> {
        let duration_ms = request.base.duration_ms();
        debug!(
            "composing {} ms clip, binaural {}+{} Hz at {} dB",
            duration_ms, request.base_freq_hz, request.beat_freq_hz, request.volume_db
        );

        let binaural_spec = BinauralSpec::new(
            request.base_freq_hz,
            request.beat_freq_hz,
            duration_ms,
            request.volume_db,
        );
        let binaural = BinauralMixer::mix(&binaural_spec)
            .map_err(|e| EntrainError::stage(ComposeStage::BinauralMix, e))?;

        let mut output = request.base.overlay(&binaural);

        if let Some(text) = &request.affirmation {
            match synthesizer.synthesize(text, &request.voice) {
                Ok(speech) => {
                    debug!(
                        "speech track is {} ms, looping to {} ms",
                        speech.duration_ms(),
                        duration_ms
                    );
                    let speech = speech.with_gain(SPEECH_ATTENUATION_DB);
                    let looped =
                        LoopEngine::render(&speech, &LoopSpec::to_duration(duration_ms, 0))
                            .map_err(|e| EntrainError::stage(ComposeStage::SpeechLoop, e))?;
                    output = output.overlay(&looped);
                }
                Err(e) => match request.on_speech_failure {
                    SpeechFailurePolicy::Abort => {
                        return Err(EntrainError::stage(ComposeStage::SpeechSynthesis, e));
                    }
                    SpeechFailurePolicy::Skip => {
                        warn!("speech synthesis failed, skipping subliminal overlay: {}", e);
                    }
                },
            }
        }

        Ok(output)
    }
}
