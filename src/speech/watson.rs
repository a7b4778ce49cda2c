//! IBM Watson Text-to-Speech adapter
//!
//! Blocking HTTP client for the hosted Watson TTS service. Authentication
//! uses the IAM apikey as basic-auth credentials; synthesis responses come
//! back as WAV bytes and are decoded through the regular import path.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::audio::buffer::AudioBuffer;
use crate::audio::io::decode_wav;
use crate::error::{EntrainError, Result};
use crate::speech::{SpeechSynthesizer, Voice};

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    voices: Vec<WatsonVoice>,
}

#[derive(Debug, Deserialize)]
struct WatsonVoice {
    name: String,
    language: String,
}

/// Client for the IBM Watson Text-to-Speech HTTP API
pub struct WatsonSpeech {
    client: Client,
    service_url: String,
    api_key: String,
}

impl WatsonSpeech {
    /// Create a client for the given service instance
    ///
    /// `timeout` bounds each round trip to the service.
    pub fn new(service_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EntrainError::Adapter {
                reason: format!("failed to build HTTP client: {}", e),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            service_url: service_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.service_url, path)
    }
}

impl SpeechSynthesizer for WatsonSpeech {
    fn synthesize(&self, text: &str, voice: &str) -> Result<AudioBuffer> {
        debug!("synthesizing {} chars with voice {}", text.len(), voice);

        let response = self
            .client
            .post(self.endpoint("synthesize"))
            .query(&[("voice", voice)])
            .basic_auth("apikey", Some(&self.api_key))
            .header(reqwest::header::ACCEPT, "audio/wav")
            .json(&serde_json::json!({ "text": text }))
            .send()
            .map_err(|e| EntrainError::Adapter {
                reason: format!("synthesize request failed: {}", e),
                source: Some(Box::new(e)),
            })?;

        if !response.status().is_success() {
            return Err(EntrainError::adapter(format!(
                "synthesize returned HTTP {}",
                response.status()
            )));
        }

        let bytes = response.bytes().map_err(|e| EntrainError::Adapter {
            reason: format!("failed to read synthesize response: {}", e),
            source: Some(Box::new(e)),
        })?;

        decode_wav(&bytes)
    }

    fn list_voices(&self) -> Result<Vec<Voice>> {
        let response = self
            .client
            .get(self.endpoint("voices"))
            .basic_auth("apikey", Some(&self.api_key))
            .send()
            .map_err(|e| EntrainError::Adapter {
                reason: format!("voices request failed: {}", e),
                source: Some(Box::new(e)),
            })?;

        if !response.status().is_success() {
            return Err(EntrainError::adapter(format!(
                "voices returned HTTP {}",
                response.status()
            )));
        }

        let parsed: VoicesResponse = response.json().map_err(|e| EntrainError::Adapter {
            reason: format!("failed to parse voices response: {}", e),
            source: Some(Box::new(e)),
        })?;

        Ok(parsed
            .voices
            .into_iter()
            .map(|v| Voice {
                label: format!("{} ({})", v.name, v.language),
                id: v.name,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = WatsonSpeech::new(
            "https://api.us-south.text-to-speech.watson.cloud.ibm.com/",
            "key",
            Duration::from_secs(10),
        )
        .unwrap();

        assert_eq!(
            client.endpoint("synthesize"),
            "https://api.us-south.text-to-speech.watson.cloud.ibm.com/v1/synthesize"
        );
    }

    #[test]
    fn test_voices_response_parsing() {
        let json = r#"{"voices":[{"name":"en-US_AllisonV3Voice","language":"en-US"}]}"#;
        let parsed: VoicesResponse = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.voices.len(), 1);
        assert_eq!(parsed.voices[0].name, "en-US_AllisonV3Voice");
    }
}
