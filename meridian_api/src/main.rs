use std::sync::Arc;

use axum::serve;
use meridian_api::app;
use meridian_api::state::AppState;
use meridian_geocode::{NominatimClient, NominatimClientParams};
use meridian_matrix::google_api::{GoogleMatrixClient, GoogleMatrixClientParams};
use meridian_tts::{ElevenLabsClient, ElevenLabsClientParams};
use tracing::{Level, info, warn};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let matrix_client = match std::env::var("GOOGLE_MAPS_API_KEY") {
        Ok(api_key) => Some(GoogleMatrixClient::new(GoogleMatrixClientParams { api_key })),
        Err(_) => {
            warn!("GOOGLE_MAPS_API_KEY is not set, distance requests will fail");
            None
        }
    };

    let geocoder = NominatimClient::new(NominatimClientParams {
        country_codes: std::env::var("GEOCODE_COUNTRY_CODES").unwrap_or_else(|_| "my".to_string()),
    });

    let tts_client = match std::env::var("TTS_API_KEY") {
        Ok(api_key) => Some(ElevenLabsClient::new(ElevenLabsClientParams {
            api_key,
            model_id: std::env::var("TTS_MODEL_ID")
                .unwrap_or_else(|_| meridian_tts::DEFAULT_MODEL_ID.to_string()),
            base_url: std::env::var("TTS_BASE_URL")
                .unwrap_or_else(|_| meridian_tts::ELEVENLABS_API_BASE_URL.to_string()),
        })),
        Err(_) => {
            warn!("TTS_API_KEY is not set, speech requests will fail");
            None
        }
    };

    let state = Arc::new(AppState {
        matrix_client,
        geocoder,
        tts_client,
    });

    let app = app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080")
        .await
        .unwrap();

    info!("Listening on http://127.0.0.1:8080");

    serve(listener, app).await.unwrap();
}
