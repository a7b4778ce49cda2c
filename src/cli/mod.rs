//! Command-line interface definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;

/// Binaural-beat and subliminal-affirmation audio composer
#[derive(Parser)]
#[command(name = "entrain-cli", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Loop a WAV file by repeat count or total duration
    Loop {
        /// Input WAV file
        input: PathBuf,
        /// Number of times to repeat the clip
        #[arg(long, conflicts_with = "duration_secs")]
        count: Option<i64>,
        /// Total duration of the looped result, in seconds
        #[arg(long)]
        duration_secs: Option<i64>,
        /// Crossfade blended at each repeat boundary, in milliseconds
        #[arg(long, default_value_t = 1000)]
        crossfade_ms: i64,
        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Overlay binaural beats (and optional affirmations) onto a WAV file
    Compose {
        /// Input WAV file
        input: PathBuf,
        /// Base frequency in Hz
        #[arg(long, default_value_t = 440)]
        base_freq: i32,
        /// Beat frequency in Hz
        #[arg(long, default_value_t = 2)]
        beat_freq: i32,
        /// Binaural beat volume in dB
        #[arg(long, default_value_t = -15.0)]
        volume_db: f32,
        /// Text file with subliminal affirmations
        #[arg(long)]
        affirmations: Option<PathBuf>,
        /// Voice identifier for speech synthesis
        #[arg(long)]
        voice: Option<String>,
        /// Proceed without the speech overlay if synthesis fails
        #[arg(long)]
        skip_on_speech_failure: bool,
        /// Timeout for speech service calls, in seconds
        #[arg(long, default_value_t = 30)]
        tts_timeout_secs: u64,
        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List voices available from the speech service
    Voices {
        /// Timeout for the voice-catalog call, in seconds
        #[arg(long, default_value_t = 30)]
        tts_timeout_secs: u64,
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Synthesize a short voice preview to a WAV file
    Preview {
        /// Voice identifier to preview
        #[arg(long)]
        voice: String,
        /// Timeout for the speech service call, in seconds
        #[arg(long, default_value_t = 30)]
        tts_timeout_secs: u64,
        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,
    },
}
