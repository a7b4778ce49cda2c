//! Audio buffer type and WAV file I/O

pub mod buffer;
pub mod io;

pub use buffer::{db_to_linear, linear_to_db, AudioBuffer, ChannelLayout, INTERNAL_SAMPLE_RATE};
pub use io::{decode_wav, export_wav, import_wav};
