use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub const ELEVENLABS_API_BASE_URL: &str = "https://api.elevenlabs.io/v1";

pub const DEFAULT_MODEL_ID: &str = "eleven_flash_v2_5";

/// Streaming endpoint, but consumed whole: callers get the full mp3 buffer.
const OUTPUT_FORMAT: &str = "mp3_44100_128";

pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

#[derive(Debug, Error)]
pub enum TtsError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Speech service error: {status} - {message}")]
    Upstream { status: u16, message: String },
}

#[derive(Serialize)]
struct SynthesisRequestBody<'a> {
    text: &'a str,
    model_id: &'a str,
}

pub struct ElevenLabsClientParams {
    pub api_key: String,
    pub model_id: String,
    pub base_url: String,
}

pub struct ElevenLabsClient {
    params: ElevenLabsClientParams,
    client: reqwest::Client,
}

impl ElevenLabsClient {
    pub fn new(params: ElevenLabsClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    /// Synthesizes `text` in the given voice and returns the mp3 bytes.
    pub async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, TtsError> {
        debug!("ElevenLabs: Synthesizing {} chars with voice {voice_id}", text.len());

        let response = self
            .client
            .post(stream_url(&self.params.base_url, voice_id))
            .header("xi-api-key", &self.params.api_key)
            .json(&SynthesisRequestBody {
                text,
                model_id: &self.params.model_id,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(TtsError::Upstream { status, message });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

fn stream_url(base_url: &str, voice_id: &str) -> String {
    format!("{base_url}/text-to-speech/{voice_id}/stream?output_format={OUTPUT_FORMAT}")
}
