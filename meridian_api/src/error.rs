use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use meridian_geocode::GeocodeError;
use meridian_tts::TtsError;
use serde_json::json;

pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    BadGateway(String),
    Configuration(String),
    InternalServerError(String),
    /// Forwards the upstream service's HTTP status with a generic message.
    UpstreamStatus { status: u16, message: String },
}

impl From<GeocodeError> for ApiError {
    fn from(error: GeocodeError) -> Self {
        match error {
            GeocodeError::Upstream { .. } => {
                ApiError::BadGateway("Failed to fetch geocode results".to_string())
            }
            GeocodeError::NoResults => ApiError::NotFound("No results found".to_string()),
            GeocodeError::InvalidCoordinates(_) => {
                ApiError::InternalServerError("Invalid coordinates received".to_string())
            }
            GeocodeError::Request(_) => {
                ApiError::InternalServerError("Failed to process geocode request".to_string())
            }
        }
    }
}

impl From<TtsError> for ApiError {
    fn from(error: TtsError) -> Self {
        match error {
            TtsError::Upstream { status, .. } => ApiError::UpstreamStatus {
                status,
                message: "Failed to generate speech".to_string(),
            },
            TtsError::Request(_) => {
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::BadGateway(message) => (StatusCode::BAD_GATEWAY, message),
            ApiError::Configuration(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
            ApiError::InternalServerError(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
            ApiError::UpstreamStatus { status, message } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message,
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_tts_failures_forward_their_status() {
        let error = ApiError::from(TtsError::Upstream {
            status: 401,
            message: "invalid key".to_string(),
        });

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn unmappable_upstream_status_falls_back_to_bad_gateway() {
        let error = ApiError::UpstreamStatus {
            status: 0,
            message: "Failed to generate speech".to_string(),
        };

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
