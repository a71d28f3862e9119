use crate::feed::aircraft::{AircraftRecord, OriginLocation, Snapshot};
use crate::prelude::FeedResult;
use serde::Deserialize;
use serde_json::Value;

/// Message used when the upstream payload does not carry one.
pub const DEFAULT_MESSAGE: &str = "No error";

/// Raw response from the public ADS-B aggregator (`/v2/lat/../lon/../dist/..`).
///
/// Aircraft stay untyped until [`UpstreamResponse::into_snapshot`] so one odd
/// record cannot fail the whole batch.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamResponse {
    #[serde(default)]
    pub ac: Vec<Value>,
    #[serde(default)]
    pub msg: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub now: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamAircraft {
    #[serde(default)]
    pub hex: Option<String>,
    #[serde(default)]
    pub flight: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub alt_baro: Option<BaroAltitude>,
    #[serde(default)]
    pub gs: Option<f64>,
    #[serde(default)]
    pub track: Option<f64>,
    #[serde(default)]
    pub baro_rate: Option<f64>,
    #[serde(default)]
    pub seen: Option<f64>,
}

/// Barometric altitude is either a number of feet or the literal `"ground"`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BaroAltitude {
    Feet(f64),
    Label(GroundLabel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroundLabel {
    Ground,
}

impl BaroAltitude {
    pub fn feet(self) -> i32 {
        match self {
            BaroAltitude::Feet(value) => value.round() as i32,
            BaroAltitude::Label(GroundLabel::Ground) => 0,
        }
    }
}

impl UpstreamAircraft {
    /// Maps onto the tracker's record shape; aircraft without a hex id or a
    /// position are dropped since they cannot be followed or placed on the map.
    pub fn into_record(self) -> Option<AircraftRecord> {
        let (latitude, longitude) = (self.lat?, self.lon?);
        Some(AircraftRecord {
            id: self.hex?,
            flight_number: self.flight,
            latitude,
            longitude,
            altitude_ft: self.alt_baro.map(BaroAltitude::feet).unwrap_or(0),
            ground_speed_kt: self.gs.unwrap_or(0.0),
            track_deg: self.track.unwrap_or(0.0).rem_euclid(360.0),
            baro_rate: self.baro_rate.map(|rate| rate.round() as i32),
            seen: self.seen,
        })
    }
}

impl UpstreamResponse {
    pub fn parse(bytes: &[u8]) -> FeedResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn into_snapshot(self, origin: OriginLocation) -> Snapshot {
        let upstream_count = self.ac.len();
        let aircraft: Vec<AircraftRecord> = self
            .ac
            .into_iter()
            .filter_map(|value| serde_json::from_value::<UpstreamAircraft>(value).ok())
            .filter_map(UpstreamAircraft::into_record)
            .collect();
        if aircraft.len() < upstream_count {
            log::debug!(
                "dropped {} unusable upstream aircraft records",
                upstream_count - aircraft.len()
            );
        }

        Snapshot {
            aircraft,
            captured_at: self.now.map(|millis| millis / 1000.0).unwrap_or(0.0),
            origin,
            message: self.msg.unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
        }
    }
}

/// Builds the aggregator URL for a circular area around `origin`.
pub fn upstream_url(base: &str, origin: &OriginLocation) -> String {
    format!(
        "{}/lat/{}/lon/{}/dist/{}",
        base.trim_end_matches('/'),
        origin.latitude,
        origin.longitude,
        origin.radius_km
    )
}
