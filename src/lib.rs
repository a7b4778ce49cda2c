//! Entrain - Binaural Beat and Subliminal Affirmation Composer
//!
//! Entrain overlays binaural-beat tones and a quiet, looped spoken
//! affirmation track onto a base audio clip.
//!
//! # Pipeline
//!
//! Composition is a strict sequential pipeline over immutable buffers:
//! 1. Generate two sine tones (base and base+beat) and pair them into a
//!    stereo binaural buffer sized to the base clip.
//! 2. Additively overlay the binaural buffer onto the base clip.
//! 3. Optionally synthesize the affirmation text via an external TTS
//!    adapter, attenuate it, loop/trim it to the base duration, and
//!    overlay it as well.
//!
//! Every operation produces a new [`audio::AudioBuffer`]; nothing is
//! mutated in place, so a failed composition never leaves a partially
//! modified buffer behind.

pub mod audio;
pub mod cli;
pub mod compose;
pub mod error;
pub mod session;
pub mod speech;
pub mod synth;

pub use audio::{AudioBuffer, ChannelLayout, INTERNAL_SAMPLE_RATE};
pub use compose::{AudioComposer, CompositionRequest, LoopEngine, LoopSpec, SpeechFailurePolicy};
pub use error::{ComposeStage, EntrainError, Result};
pub use synth::{BinauralMixer, BinauralSpec, ToneGenerator, ToneSpec};
