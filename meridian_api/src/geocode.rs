use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize)]
pub struct GeocodeQuery {
    pub query: Option<String>,
}

#[derive(Serialize)]
pub struct GeocodeResponse {
    lat: f64,
    lon: f64,
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
}

impl IntoResponse for GeocodeResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Forward-geocodes a free-text query to the best-matching coordinates.
pub async fn geocode_handler<M>(
    State(state): State<Arc<AppState<M>>>,
    Query(params): Query<GeocodeQuery>,
) -> Result<GeocodeResponse, ApiError> {
    let query = params.query.unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("Missing query".to_string()));
    }

    let place = state.geocoder.search(query).await?;

    Ok(GeocodeResponse {
        lat: place.lat,
        lon: place.lon,
        display_name: place.display_name,
    })
}
