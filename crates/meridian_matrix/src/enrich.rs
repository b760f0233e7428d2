use geo_types::Point;
use tracing::warn;

use crate::distance_matrix::{DistanceMatrix, MatrixElement};
use crate::provider::Provider;

/// Upstream limit on destinations per matrix request.
pub const MAX_BATCH_SIZE: usize = 10;

/// Annotates every locatable provider with road distance (km) and driving
/// time from `origin`, best effort.
///
/// Providers without usable coordinates pass through untouched, as does any
/// provider whose lookup fails, whether the whole batch failed or just its
/// element. The output has the same length, identity, and order as the
/// input. Batches are fetched strictly sequentially.
pub async fn enrich_with_distances<M: DistanceMatrix>(
    client: &M,
    origin: Point,
    mut providers: Vec<Provider>,
) -> Vec<Provider> {
    let locatable: Vec<(String, Point)> = providers
        .iter()
        .filter_map(|p| p.location().map(|point| (p.id.clone(), point)))
        .collect();

    for batch in locatable.chunks(MAX_BATCH_SIZE) {
        let destinations: Vec<Point> = batch.iter().map(|(_, point)| *point).collect();

        let elements = match client.fetch_elements(origin, &destinations).await {
            Ok(elements) => elements,
            Err(error) => {
                warn!("Distance lookup failed for a batch of {}: {error}", batch.len());
                continue;
            }
        };

        // Protocol mismatch: never index past the batch.
        if elements.len() != batch.len() {
            warn!(
                "Distance matrix returned {} elements for a batch of {}, skipping batch",
                elements.len(),
                batch.len()
            );
            continue;
        }

        for ((id, _), element) in batch.iter().zip(elements) {
            let MatrixElement::Ok(estimate) = element else {
                continue;
            };

            // Match by id, not position: batch order diverges from list
            // order once unlocatable providers are filtered out.
            if let Some(provider) = providers.iter_mut().find(|p| p.id == *id) {
                provider.distance = Some(round_to_km(estimate.distance_meters));
                provider.driving_time = Some(estimate.duration_text);
            }
        }
    }

    providers
}

fn round_to_km(meters: f64) -> f64 {
    (meters / 1000.0 * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::distance_matrix::{MatrixError, TravelEstimate};

    /// Scripted stand-in for the external matrix service. Plays back one
    /// prepared response per batch, in order, and records batch sizes.
    struct ScriptedMatrix {
        responses: Mutex<Vec<Result<Vec<MatrixElement>, MatrixError>>>,
        batch_sizes: Mutex<Vec<usize>>,
    }

    impl ScriptedMatrix {
        fn new(responses: Vec<Result<Vec<MatrixElement>, MatrixError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                batch_sizes: Mutex::new(vec![]),
            }
        }

        fn batch_sizes(&self) -> Vec<usize> {
            self.batch_sizes.lock().unwrap().clone()
        }
    }

    impl DistanceMatrix for ScriptedMatrix {
        async fn fetch_elements(
            &self,
            _origin: Point,
            destinations: &[Point],
        ) -> Result<Vec<MatrixElement>, MatrixError> {
            self.batch_sizes.lock().unwrap().push(destinations.len());
            let mut responses = self.responses.lock().unwrap();
            assert!(!responses.is_empty(), "unexpected extra matrix request");
            responses.remove(0)
        }
    }

    fn ok_element(km: f64, text: &str) -> MatrixElement {
        MatrixElement::Ok(TravelEstimate {
            distance_meters: km * 1000.0,
            duration_text: text.to_string(),
        })
    }

    fn ok_batch(len: usize) -> Result<Vec<MatrixElement>, MatrixError> {
        Ok((0..len).map(|i| ok_element(i as f64 + 1.0, "10 mins")).collect())
    }

    fn located(id: &str) -> Provider {
        Provider {
            id: id.to_string(),
            latitude: Some(3.139),
            longitude: Some(101.6869),
            distance: None,
            driving_time: None,
            extra: serde_json::Map::new(),
        }
    }

    fn unlocated(id: &str) -> Provider {
        Provider {
            id: id.to_string(),
            latitude: None,
            longitude: None,
            distance: None,
            driving_time: None,
            extra: serde_json::Map::new(),
        }
    }

    fn origin() -> Point {
        Point::new(101.6869, 3.139)
    }

    #[tokio::test]
    async fn preserves_length_and_order() {
        let providers = vec![located("a"), unlocated("b"), located("c")];
        let matrix = ScriptedMatrix::new(vec![ok_batch(2)]);

        let result = enrich_with_distances(&matrix, origin(), providers).await;

        let ids: Vec<&str> = result.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn providers_without_coordinates_pass_through() {
        let providers = vec![unlocated("a"), located("b")];
        let matrix = ScriptedMatrix::new(vec![ok_batch(1)]);

        let result = enrich_with_distances(&matrix, origin(), providers).await;

        assert!(result[0].distance.is_none());
        assert!(result[0].driving_time.is_none());
        assert!(result[1].distance.is_some());
        assert!(result[1].driving_time.is_some());
    }

    #[tokio::test]
    async fn batches_are_capped_at_ten() {
        let providers: Vec<Provider> = (0..25).map(|i| located(&format!("p{i}"))).collect();
        let matrix = ScriptedMatrix::new(vec![ok_batch(10), ok_batch(10), ok_batch(5)]);

        let result = enrich_with_distances(&matrix, origin(), providers).await;

        assert_eq!(matrix.batch_sizes(), vec![10, 10, 5]);
        assert!(result.iter().all(|p| p.distance.is_some()));
    }

    #[tokio::test]
    async fn meters_are_rounded_to_one_decimal_km() {
        let providers = vec![located("a")];
        let matrix = ScriptedMatrix::new(vec![Ok(vec![MatrixElement::Ok(TravelEstimate {
            distance_meters: 12345.0,
            duration_text: "23 mins".to_string(),
        })])]);

        let result = enrich_with_distances(&matrix, origin(), providers).await;

        assert_eq!(result[0].distance, Some(12.3));
        assert_eq!(result[0].driving_time.as_deref(), Some("23 mins"));
    }

    #[tokio::test]
    async fn failed_batch_does_not_affect_other_batches() {
        let providers: Vec<Provider> = (0..25).map(|i| located(&format!("p{i}"))).collect();
        let matrix = ScriptedMatrix::new(vec![
            ok_batch(10),
            Err(MatrixError::MatrixStatus("OVER_QUERY_LIMIT".to_string())),
            ok_batch(5),
        ]);

        let result = enrich_with_distances(&matrix, origin(), providers).await;

        assert!(result[..10].iter().all(|p| p.distance.is_some()));
        assert!(result[10..20].iter().all(|p| p.distance.is_none()));
        assert!(result[20..].iter().all(|p| p.distance.is_some()));
    }

    #[tokio::test]
    async fn failed_element_only_affects_its_provider() {
        let providers = vec![located("a"), located("b"), located("c")];
        let matrix = ScriptedMatrix::new(vec![Ok(vec![
            ok_element(1.0, "5 mins"),
            MatrixElement::Failed {
                status: "NOT_FOUND".to_string(),
            },
            ok_element(3.0, "12 mins"),
        ])]);

        let result = enrich_with_distances(&matrix, origin(), providers).await;

        assert!(result[0].distance.is_some());
        assert!(result[1].distance.is_none());
        assert!(result[1].driving_time.is_none());
        assert!(result[2].distance.is_some());
    }

    #[tokio::test]
    async fn element_count_mismatch_skips_the_batch() {
        let providers = vec![located("a"), located("b")];
        let matrix = ScriptedMatrix::new(vec![Ok(vec![ok_element(1.0, "5 mins")])]);

        let result = enrich_with_distances(&matrix, origin(), providers).await;

        assert!(result.iter().all(|p| p.distance.is_none()));
    }

    #[tokio::test]
    async fn empty_input_makes_no_requests() {
        let matrix = ScriptedMatrix::new(vec![]);

        let result = enrich_with_distances(&matrix, origin(), vec![]).await;

        assert!(result.is_empty());
        assert!(matrix.batch_sizes().is_empty());
    }

    #[tokio::test]
    async fn no_locatable_providers_makes_no_requests() {
        let providers = vec![unlocated("a"), unlocated("b")];
        let matrix = ScriptedMatrix::new(vec![]);

        let result = enrich_with_distances(&matrix, origin(), providers).await;

        assert_eq!(result.len(), 2);
        assert!(matrix.batch_sizes().is_empty());
    }
}
