use crate::feed::aircraft::{AircraftRecord, OriginLocation, Snapshot};
use serde::{Deserialize, Serialize};

/// `message` value marking a snapshot as synthetic test data.
pub const MOCK_MESSAGE: &str = "mock data";

/// JSON body served by the proxy at `/api/aircraft`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedResponse {
    pub total: usize,
    pub now: f64,
    pub message: String,
    pub aircraft: Vec<AircraftRecord>,
    pub cached: bool,
    pub location: OriginLocation,
    /// Set when the most recent refresh failed and stale data is served.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FeedResponse {
    pub fn from_snapshot(snapshot: &Snapshot, cached: bool) -> Self {
        Self {
            total: snapshot.aircraft.len(),
            now: snapshot.captured_at,
            message: snapshot.message.clone(),
            aircraft: snapshot.aircraft.clone(),
            cached,
            location: snapshot.origin,
            error: None,
        }
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    pub fn into_snapshot(self) -> Snapshot {
        Snapshot {
            aircraft: self.aircraft,
            captured_at: self.now,
            origin: self.location,
            message: self.message,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.message == MOCK_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::mock::{mock_snapshot, sample_fleet};

    #[test]
    fn response_carries_snapshot_metadata() {
        let snapshot = mock_snapshot(sample_fleet(), None);
        let response = FeedResponse::from_snapshot(&snapshot, true);

        assert_eq!(response.total, 10);
        assert!(response.cached);
        assert!(response.is_mock());

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["location"]["radius"], 100.0);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn proxy_body_decodes_into_snapshot() {
        let body = r#"{
            "total": 1, "now": 1730000000.5, "message": "No error", "cached": true,
            "location": {"lat": 13.7, "lon": 100.76, "radius": 75},
            "aircraft": [{"hex": "8840a1", "flight": "THA661", "lat": 13.8, "lon": 100.9,
                          "alt_baro": 12500, "gs": 310.0, "track": 187.0}]
        }"#;
        let parsed: FeedResponse = serde_json::from_str(body).unwrap();
        assert!(!parsed.is_mock());

        let snapshot = parsed.into_snapshot();
        assert_eq!(snapshot.origin.radius_km, 75.0);
        assert_eq!(snapshot.find_by_id("8840a1").map(|ac| ac.altitude_ft), Some(12500));
    }

    #[test]
    fn error_field_is_serialized_when_present() {
        let snapshot = mock_snapshot(Vec::new(), None);
        let response = FeedResponse::from_snapshot(&snapshot, true)
            .with_error(Some("upstream request failed: timeout".into()));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["error"], "upstream request failed: timeout");
    }
}
