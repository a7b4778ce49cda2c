//! CLI command implementations

use std::path::Path;

use log::info;

use crate::audio::{export_wav, import_wav};
use crate::compose::{AudioComposer, CompositionRequest, LoopEngine, LoopSpec, SpeechFailurePolicy};
use crate::error::{EntrainError, Result};
use crate::speech::{MockSpeech, SpeechSynthesizer};

/// Default Watson voice, matching the original app
const DEFAULT_VOICE: &str = "en-US_AllisonV3Voice";

/// Fixed sentence used by the preview command
const PREVIEW_TEXT: &str = "This is a voice preview.";

/// Build the configured speech adapter
///
/// The Watson client reads its credentials from `WATSON_URL` and
/// `WATSON_API_KEY`. Builds without the `watson` feature report a clear
/// adapter error instead.
fn make_synthesizer(timeout_secs: u64) -> Result<Box<dyn SpeechSynthesizer>> {
    #[cfg(feature = "watson")]
    {
        let url = std::env::var("WATSON_URL")
            .map_err(|_| EntrainError::adapter("WATSON_URL is not set"))?;
        let key = std::env::var("WATSON_API_KEY")
            .map_err(|_| EntrainError::adapter("WATSON_API_KEY is not set"))?;
        let client = crate::speech::WatsonSpeech::new(
            url,
            key,
            std::time::Duration::from_secs(timeout_secs),
        )?;
        Ok(Box::new(client))
    }
    #[cfg(not(feature = "watson"))]
    {
        let _ = timeout_secs;
        Err(EntrainError::adapter(
            "speech synthesis requires building with the `watson` feature",
        ))
    }
}

/// Loop a WAV file by count or total duration
pub fn loop_file(
    input: &Path,
    count: Option<i64>,
    duration_secs: Option<i64>,
    crossfade_ms: i64,
    output: &Path,
) -> Result<()> {
    info!("looping {} -> {}", input.display(), output.display());

    let spec = match (count, duration_secs) {
        (Some(n), None) => LoopSpec::by_count(n, crossfade_ms),
        (None, Some(secs)) => LoopSpec::to_duration(secs * 1000, crossfade_ms),
        (None, None) => LoopSpec::identity(),
        (Some(_), Some(_)) => {
            return Err(EntrainError::invalid_parameter(
                "specify either --count or --duration-secs, not both",
            ));
        }
    };

    let buffer = import_wav(input)?;
    let looped = LoopEngine::render(&buffer, &spec)?;
    export_wav(&looped, output)?;

    println!(
        "Looped {} ms to {} ms: {}",
        buffer.duration_ms(),
        looped.duration_ms(),
        output.display()
    );
    Ok(())
}

/// Compose binaural beats and optional affirmations onto a WAV file
#[allow(clippy::too_many_arguments)]
pub fn compose_file(
    input: &Path,
    base_freq: i32,
    beat_freq: i32,
    volume_db: f32,
    affirmations: Option<&Path>,
    voice: Option<&str>,
    skip_on_speech_failure: bool,
    tts_timeout_secs: u64,
    output: &Path,
) -> Result<()> {
    info!("composing {} -> {}", input.display(), output.display());

    let base = import_wav(input)?;
    let mut request = CompositionRequest::new(base, base_freq, beat_freq, volume_db);

    if let Some(text_path) = affirmations {
        let text = std::fs::read_to_string(text_path)?;
        request = request.with_affirmation(text, voice.unwrap_or(DEFAULT_VOICE));
        if skip_on_speech_failure {
            request = request.on_speech_failure(SpeechFailurePolicy::Skip);
        }
    }

    // Without an affirmation the adapter is never invoked; the inert mock
    // avoids requiring credentials for tone-only runs
    let synthesizer: Box<dyn SpeechSynthesizer> = if request.affirmation.is_some() {
        make_synthesizer(tts_timeout_secs)?
    } else {
        Box::new(MockSpeech::new())
    };

    let composed = AudioComposer::compose(&request, synthesizer.as_ref())?;
    export_wav(&composed, output)?;

    println!(
        "Composed {} ms ({} channels, {:.1} dB RMS): {}",
        composed.duration_ms(),
        composed.num_channels(),
        composed.rms_db(),
        output.display()
    );
    Ok(())
}

/// List the speech service's voice catalog
pub fn list_voices(tts_timeout_secs: u64, json: bool) -> Result<()> {
    let synthesizer = make_synthesizer(tts_timeout_secs)?;
    let voices = synthesizer.list_voices()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&voices)?);
        return Ok(());
    }

    if voices.is_empty() {
        println!("No voices available.");
        return Ok(());
    }

    for voice in voices {
        println!("{:<30} {}", voice.id, voice.label);
    }
    Ok(())
}

/// Synthesize a short preview of a voice to a WAV file
pub fn preview_voice(voice: &str, tts_timeout_secs: u64, output: &Path) -> Result<()> {
    info!("previewing voice {}", voice);

    let synthesizer = make_synthesizer(tts_timeout_secs)?;
    let speech = synthesizer.synthesize(PREVIEW_TEXT, voice)?;
    export_wav(&speech, output)?;

    println!(
        "Preview ({} ms): {}",
        speech.duration_ms(),
        output.display()
    );
    Ok(())
}
