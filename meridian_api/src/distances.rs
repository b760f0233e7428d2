use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use geo_types::Point;
use meridian_matrix::distance_matrix::DistanceMatrix;
use meridian_matrix::enrich::enrich_with_distances;
use meridian_matrix::provider::Provider;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateDistancesRequest {
    pub user_latitude: f64,
    pub user_longitude: f64,
    pub providers: Vec<Provider>,
}

#[derive(Serialize)]
pub struct CalculateDistancesResponse {
    providers: Vec<Provider>,
}

impl IntoResponse for CalculateDistancesResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Annotates the posted providers with road distance and driving time from
/// the user's location, best effort: providers the matrix service can't
/// resolve come back untouched, and the response is still a 200.
pub async fn calculate_distances_handler<M: DistanceMatrix + Send + Sync>(
    State(state): State<Arc<AppState<M>>>,
    Json(body): Json<CalculateDistancesRequest>,
) -> Result<CalculateDistancesResponse, ApiError> {
    let Some(matrix_client) = &state.matrix_client else {
        return Err(ApiError::Configuration(
            "Distance matrix API key not configured".to_string(),
        ));
    };

    let origin = Point::new(body.user_longitude, body.user_latitude);
    let providers = enrich_with_distances(matrix_client, origin, body.providers).await;

    Ok(CalculateDistancesResponse { providers })
}
