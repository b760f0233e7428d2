use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use meridian_tts::AUDIO_CONTENT_TYPE;
use serde::Deserialize;

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsRequest {
    pub text: Option<String>,
    pub voice_id: Option<String>,
}

pub struct SpeechResponse {
    audio: Vec<u8>,
}

impl IntoResponse for SpeechResponse {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, AUDIO_CONTENT_TYPE)], self.audio).into_response()
    }
}

/// Synthesizes the posted text as mp3 audio in the requested voice.
pub async fn tts_handler<M>(
    State(state): State<Arc<AppState<M>>>,
    Json(body): Json<TtsRequest>,
) -> Result<SpeechResponse, ApiError> {
    let (Some(text), Some(voice_id)) = (
        body.text.filter(|t| !t.is_empty()),
        body.voice_id.filter(|v| !v.is_empty()),
    ) else {
        return Err(ApiError::BadRequest(
            "Missing required parameters: text or voiceId".to_string(),
        ));
    };

    let Some(tts_client) = &state.tts_client else {
        return Err(ApiError::Configuration(
            "TTS API key not configured".to_string(),
        ));
    };

    let audio = tts_client.synthesize(&text, &voice_id).await?;

    Ok(SpeechResponse { audio })
}
