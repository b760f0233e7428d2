use geo_types::Point;
use serde::{Deserialize, Serialize};

/// A healthcare provider record as it travels through the enrichment
/// pipeline. Only the fields the pipeline reads or writes are typed;
/// everything else the caller sent (name, address, services, ...) is kept
/// in `extra` and serialized back untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Road distance from the request origin, in kilometers, one decimal.
    /// Set together with `driving_time`, never alone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,

    /// Upstream-formatted duration text, e.g. "23 mins".
    #[serde(rename = "drivingTime", skip_serializing_if = "Option::is_none")]
    pub driving_time: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Provider {
    /// The provider's coordinates, if it can be located at all.
    ///
    /// Zero is treated as absent: upstream records with unknown locations
    /// carry 0.0 rather than null, and (0, 0) is open ocean.
    pub fn location(&self) -> Option<Point> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon))
                if lat.is_finite() && lon.is_finite() && lat != 0.0 && lon != 0.0 =>
            {
                Some(Point::new(lon, lat))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(lat: Option<f64>, lon: Option<f64>) -> Provider {
        Provider {
            id: "p1".to_string(),
            latitude: lat,
            longitude: lon,
            distance: None,
            driving_time: None,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn location_requires_both_coordinates() {
        assert!(provider(Some(3.139), Some(101.6869)).location().is_some());
        assert!(provider(Some(3.139), None).location().is_none());
        assert!(provider(None, Some(101.6869)).location().is_none());
        assert!(provider(None, None).location().is_none());
    }

    #[test]
    fn zero_coordinates_are_not_locatable() {
        assert!(provider(Some(0.0), Some(101.6869)).location().is_none());
        assert!(provider(Some(3.139), Some(0.0)).location().is_none());
    }

    #[test]
    fn unknown_fields_round_trip() {
        let input = serde_json::json!({
            "id": "clinic-7",
            "name": "Klinik Kesihatan",
            "latitude": 3.139,
            "longitude": 101.6869,
            "services": ["screening", "counselling"],
        });

        let provider: Provider = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(provider.extra["name"], "Klinik Kesihatan");

        let output = serde_json::to_value(&provider).unwrap();
        assert_eq!(output, input);
    }
}
