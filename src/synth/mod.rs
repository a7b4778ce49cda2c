//! Tone synthesis
//!
//! Pure sine-wave generation and binaural stereo mixing.

mod binaural;
mod tone;

pub use binaural::{BinauralMixer, BinauralSpec};
pub use tone::{ToneGenerator, ToneSpec};
