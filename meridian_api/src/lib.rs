pub mod distances;
pub mod error;
pub mod geocode;
pub mod state;
pub mod tts;

use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::{get, post};
use meridian_matrix::distance_matrix::DistanceMatrix;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::distances::calculate_distances_handler;
use crate::geocode::geocode_handler;
use crate::state::AppState;
use crate::tts::tts_handler;

pub fn app<M: DistanceMatrix + Send + Sync + 'static>(state: Arc<AppState<M>>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/calculate-distances",
            post(calculate_distances_handler::<M>),
        )
        .route("/api/geocode", get(geocode_handler::<M>))
        .route("/api/tts", post(tts_handler::<M>))
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state)
}
