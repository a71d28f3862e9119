use serde::{Deserialize, Serialize};

/// A single tracked aircraft as exposed to the map and the query engine.
///
/// Field names on the wire follow the upstream ADS-B feed so the proxy and
/// the viewer share one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftRecord {
    #[serde(rename = "hex")]
    pub id: String,
    #[serde(rename = "flight", default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(rename = "alt_baro")]
    pub altitude_ft: i32,
    #[serde(rename = "gs")]
    pub ground_speed_kt: f64,
    #[serde(rename = "track")]
    pub track_deg: f64,
    /// Vertical rate in feet per minute, when the transponder reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baro_rate: Option<i32>,
    /// Seconds since the last message from this aircraft.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seen: Option<f64>,
}

impl AircraftRecord {
    /// Trimmed, lowercased flight number used for matching.
    pub fn normalized_flight(&self) -> Option<String> {
        self.flight_number
            .as_deref()
            .map(|flight| flight.trim().to_lowercase())
    }

    /// Flight number for display, falling back to the hex id.
    pub fn callsign(&self) -> &str {
        match self.flight_number.as_deref().map(str::trim) {
            Some(flight) if !flight.is_empty() => flight,
            _ => &self.id,
        }
    }
}

/// Centre and radius of the area the feed covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OriginLocation {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(rename = "radius")]
    pub radius_km: f64,
}

impl OriginLocation {
    pub fn new(latitude: f64, longitude: f64, radius_km: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_km,
        }
    }
}

/// Every aircraft currently tracked, captured in one refresh.
///
/// A snapshot is never merged into; a newer one replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub aircraft: Vec<AircraftRecord>,
    pub captured_at: f64,
    pub origin: OriginLocation,
    pub message: String,
}

impl Snapshot {
    pub fn new(
        aircraft: Vec<AircraftRecord>,
        captured_at: f64,
        origin: OriginLocation,
        message: impl Into<String>,
    ) -> Self {
        Self {
            aircraft,
            captured_at,
            origin,
            message: message.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&AircraftRecord> {
        self.aircraft.iter().find(|aircraft| aircraft.id == id)
    }
}
