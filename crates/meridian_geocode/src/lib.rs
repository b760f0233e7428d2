use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

const USER_AGENT: &str = "MeridianApp/1.0 (support@meridian.app)";

/// A geocoded place: the best match for a free-text query.
#[derive(Debug, Clone)]
pub struct GeocodedPlace {
    pub lat: f64,
    pub lon: f64,
    pub display_name: Option<String>,
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Geocoding service error: {status}")]
    Upstream { status: u16 },

    #[error("No results found")]
    NoResults,

    #[error("Invalid coordinates in result: {0}")]
    InvalidCoordinates(String),
}

/// Nominatim returns coordinates as strings.
#[derive(Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

pub struct NominatimClientParams {
    /// ISO country code constraining results, e.g. "my".
    pub country_codes: String,
}

pub struct NominatimClient {
    params: NominatimClientParams,
    client: reqwest::Client,
}

impl NominatimClient {
    pub fn new(params: NominatimClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    /// Forward-geocodes `query` to its single best match.
    pub async fn search(&self, query: &str) -> Result<GeocodedPlace, GeocodeError> {
        debug!("Nominatim: Geocoding {query:?}");

        let response = self
            .client
            .get(NOMINATIM_SEARCH_URL)
            .header("User-Agent", USER_AGENT)
            .header("Accept-Language", "en")
            .query(&[
                ("format", "json"),
                ("limit", "1"),
                ("addressdetails", "1"),
                ("countrycodes", &self.params.country_codes),
                ("q", query),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodeError::Upstream {
                status: response.status().as_u16(),
            });
        }

        let results: Vec<SearchResult> = response.json().await?;
        first_place(results)
    }
}

fn first_place(results: Vec<SearchResult>) -> Result<GeocodedPlace, GeocodeError> {
    let result = results.into_iter().next().ok_or(GeocodeError::NoResults)?;

    let lat: f64 = result
        .lat
        .parse()
        .map_err(|_| GeocodeError::InvalidCoordinates(result.lat.clone()))?;
    let lon: f64 = result
        .lon
        .parse()
        .map_err(|_| GeocodeError::InvalidCoordinates(result.lon.clone()))?;

    if !lat.is_finite() || !lon.is_finite() {
        return Err(GeocodeError::InvalidCoordinates(format!("{lat},{lon}")));
    }

    Ok(GeocodedPlace {
        lat,
        lon,
        display_name: result.display_name,
    })
}
