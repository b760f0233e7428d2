use geo_types::Point;
use serde::Deserialize;
use tracing::debug;

use crate::distance_matrix::{DistanceMatrix, MatrixElement, MatrixError, TravelEstimate};

pub const DISTANCE_MATRIX_API_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Google reports `status: "OK"` both for the whole response and per element.
const STATUS_OK: &str = "OK";

#[derive(Deserialize)]
struct MatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<MatrixRow>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct MatrixRow {
    elements: Vec<MatrixElementResponse>,
}

#[derive(Deserialize)]
struct MatrixElementResponse {
    status: String,
    distance: Option<ElementDistance>,
    duration: Option<ElementDuration>,
}

#[derive(Deserialize)]
struct ElementDistance {
    /// Meters.
    value: f64,
}

#[derive(Deserialize)]
struct ElementDuration {
    /// Human-readable, e.g. "23 mins".
    text: String,
}

pub struct GoogleMatrixClientParams {
    pub api_key: String,
}

pub struct GoogleMatrixClient {
    params: GoogleMatrixClientParams,
    client: reqwest::Client,
}

impl GoogleMatrixClient {
    pub fn new(params: GoogleMatrixClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    async fn matrix_request(
        &self,
        origin: Point,
        destinations: &[Point],
    ) -> Result<MatrixResponse, MatrixError> {
        let response = self
            .client
            .get(DISTANCE_MATRIX_API_URL)
            .query(&[
                ("origins", coordinate_param(origin)),
                ("destinations", destinations_param(destinations)),
                ("units", "metric".to_string()),
                ("mode", "driving".to_string()),
                ("key", self.params.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(MatrixError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}

impl DistanceMatrix for GoogleMatrixClient {
    async fn fetch_elements(
        &self,
        origin: Point,
        destinations: &[Point],
    ) -> Result<Vec<MatrixElement>, MatrixError> {
        debug!(
            "GoogleMatrixApi: Requesting matrix for {} destinations",
            destinations.len()
        );

        let response = self.matrix_request(origin, destinations).await?;
        parse_elements(response)
    }
}

/// Points are carried as (x = lon, y = lat); the wire format is "lat,lon".
fn coordinate_param(point: Point) -> String {
    format!("{},{}", point.y(), point.x())
}

fn destinations_param(destinations: &[Point]) -> String {
    destinations
        .iter()
        .map(|p| coordinate_param(*p))
        .collect::<Vec<_>>()
        .join("|")
}

fn parse_elements(response: MatrixResponse) -> Result<Vec<MatrixElement>, MatrixError> {
    if response.status != STATUS_OK {
        let mut status = response.status;
        if let Some(message) = response.error_message {
            status = format!("{status}: {message}");
        }
        return Err(MatrixError::MatrixStatus(status));
    }

    let row = response
        .rows
        .into_iter()
        .next()
        .ok_or_else(|| MatrixError::MalformedResponse("response has no rows".to_string()))?;

    let elements = row
        .elements
        .into_iter()
        .map(|element| {
            if element.status != STATUS_OK {
                return Ok(MatrixElement::Failed {
                    status: element.status,
                });
            }

            match (element.distance, element.duration) {
                (Some(distance), Some(duration)) => Ok(MatrixElement::Ok(TravelEstimate {
                    distance_meters: distance.value,
                    duration_text: duration.text,
                })),
                _ => Err(MatrixError::MalformedResponse(
                    "OK element without distance/duration".to_string(),
                )),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(elements)
}
