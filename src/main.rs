//! Entrain CLI - Binaural Beat Audio Composer
//!
//! Command-line interface for looping audio and composing binaural-beat
//! and subliminal-affirmation overlays.

use clap::Parser;
use env_logger::Env;
use log::info;

use entrain::cli::{commands, Cli, Commands};
use entrain::Result;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("Entrain v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Entrain v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Loop {
            input,
            count,
            duration_secs,
            crossfade_ms,
            output,
        } => commands::loop_file(&input, count, duration_secs, crossfade_ms, &output),
        Commands::Compose {
            input,
            base_freq,
            beat_freq,
            volume_db,
            affirmations,
            voice,
            skip_on_speech_failure,
            tts_timeout_secs,
            output,
        } => commands::compose_file(
            &input,
            base_freq,
            beat_freq,
            volume_db,
            affirmations.as_deref(),
            voice.as_deref(),
            skip_on_speech_failure,
            tts_timeout_secs,
            &output,
        ),
        Commands::Voices {
            tts_timeout_secs,
            json,
        } => commands::list_voices(tts_timeout_secs, json),
        Commands::Preview {
            voice,
            tts_timeout_secs,
            output,
        } => commands::preview_voice(&voice, tts_timeout_secs, &output),
    }
}
