use meridian_geocode::NominatimClient;
use meridian_tts::ElevenLabsClient;

/// Generic over the matrix client so tests can run the router against a
/// scripted matrix instead of the live service.
pub struct AppState<M> {
    /// `None` when no API credential was configured at startup; requests
    /// needing it fail with a configuration error without going outbound.
    pub matrix_client: Option<M>,
    pub geocoder: NominatimClient,
    /// Same convention as `matrix_client`.
    pub tts_client: Option<ElevenLabsClient>,
}
