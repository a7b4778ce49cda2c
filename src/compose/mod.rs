//! Audio timeline composition
//!
//! The loop engine and the top-level composer that orchestrates binaural
//! and speech overlays onto a base clip.

mod composer;
mod loops;

pub use composer::{AudioComposer, CompositionRequest, SpeechFailurePolicy, SPEECH_ATTENUATION_DB};
pub use loops::{LoopEngine, LoopMode, LoopSpec};
