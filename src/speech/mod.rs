//! Speech synthesis boundary
//!
//! The composer only cares about the buffer contract: given affirmation
//! text and a voice selector, an adapter returns a synthesized speech
//! buffer or an adapter error. The hosted TTS protocol itself lives
//! entirely behind this trait.

mod mock;
#[cfg(feature = "watson")]
mod watson;

pub use mock::MockSpeech;
#[cfg(feature = "watson")]
pub use watson::WatsonSpeech;

use serde::{Deserialize, Serialize};

use crate::audio::buffer::AudioBuffer;
use crate::error::Result;

/// One entry of the adapter's voice catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Opaque voice identifier passed back to `synthesize`
    pub id: String,
    /// Human-readable label for display
    pub label: String,
}

/// External text-to-speech adapter
///
/// Both calls are single synchronous round trips; implementations carry
/// their own caller-supplied timeout. Failures surface as
/// [`crate::EntrainError::Adapter`] and never leave a partially written
/// buffer behind.
pub trait SpeechSynthesizer {
    /// Synthesize `text` in the given voice, returning a speech buffer
    fn synthesize(&self, text: &str, voice: &str) -> Result<AudioBuffer>;

    /// List the voices this adapter offers
    fn list_voices(&self) -> Result<Vec<Voice>>;
}
