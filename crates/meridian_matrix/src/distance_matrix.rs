use geo_types::Point;
use thiserror::Error;

/// One destination's result within a matrix response. The upstream API
/// reports a status per element, so a request can succeed overall while
/// individual destinations fail (unroutable coordinates, no road access).
#[derive(Debug, Clone)]
pub enum MatrixElement {
    Ok(TravelEstimate),
    Failed { status: String },
}

#[derive(Debug, Clone)]
pub struct TravelEstimate {
    /// Road distance in meters.
    pub distance_meters: f64,
    /// Duration text as formatted by the upstream service, e.g. "23 mins".
    pub duration_text: String,
}

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Matrix request rejected with status: {0}")]
    MatrixStatus(String),

    #[error("Malformed matrix response: {0}")]
    MalformedResponse(String),
}

/// A distance-matrix provider: one origin, a batch of destinations, one
/// result element per destination in the same order.
///
/// The concrete implementation talks to an external service; tests
/// substitute a fake.
pub trait DistanceMatrix {
    fn fetch_elements(
        &self,
        origin: Point,
        destinations: &[Point],
    ) -> impl Future<Output = Result<Vec<MatrixElement>, MatrixError>> + Send;
}
