//! Synthetic aircraft for offline use and tests.

use crate::feed::aircraft::{AircraftRecord, OriginLocation, Snapshot};
use crate::feed::contract::MOCK_MESSAGE;

/// Area used when a mock snapshot is built without an explicit location.
pub const MOCK_ORIGIN: OriginLocation = OriginLocation {
    latitude: 13.69,
    longitude: 100.75,
    radius_km: 100.0,
};

/// Builder for a single aircraft with sensible defaults.
#[derive(Debug, Clone)]
pub struct MockAircraft {
    record: AircraftRecord,
}

pub fn mock_aircraft() -> MockAircraft {
    MockAircraft {
        record: AircraftRecord {
            id: "000000".into(),
            flight_number: Some("TEST123".into()),
            latitude: MOCK_ORIGIN.latitude,
            longitude: MOCK_ORIGIN.longitude,
            altitude_ft: 10_000,
            ground_speed_kt: 250.0,
            track_deg: 0.0,
            baro_rate: None,
            seen: None,
        },
    }
}

impl MockAircraft {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.record.id = id.into();
        self
    }

    pub fn flight(mut self, flight: impl Into<String>) -> Self {
        self.record.flight_number = Some(flight.into());
        self
    }

    pub fn no_flight(mut self) -> Self {
        self.record.flight_number = None;
        self
    }

    pub fn position(mut self, latitude: f64, longitude: f64) -> Self {
        self.record.latitude = latitude;
        self.record.longitude = longitude;
        self
    }

    pub fn altitude(mut self, altitude_ft: i32) -> Self {
        self.record.altitude_ft = altitude_ft;
        self
    }

    pub fn speed(mut self, ground_speed_kt: f64) -> Self {
        self.record.ground_speed_kt = ground_speed_kt;
        self
    }

    pub fn track(mut self, track_deg: f64) -> Self {
        self.record.track_deg = track_deg;
        self
    }

    pub fn build(self) -> AircraftRecord {
        self.record
    }
}

/// Wraps `aircraft` in a snapshot tagged with [`MOCK_MESSAGE`].
pub fn mock_snapshot(aircraft: Vec<AircraftRecord>, origin: Option<OriginLocation>) -> Snapshot {
    Snapshot::new(aircraft, 0.0, origin.unwrap_or(MOCK_ORIGIN), MOCK_MESSAGE)
}

pub fn is_mock(snapshot: Option<&Snapshot>) -> bool {
    snapshot.is_some_and(|snapshot| snapshot.message == MOCK_MESSAGE)
}

/// Picks the snapshot to display: the mock fleet when `use_mock` is set,
/// otherwise whatever the live feed last delivered.
pub fn select_source(
    use_mock: bool,
    mock_fleet: &[AircraftRecord],
    live: Option<&Snapshot>,
) -> Option<Snapshot> {
    if use_mock {
        Some(mock_snapshot(mock_fleet.to_vec(), None))
    } else {
        live.cloned()
    }
}

/// Ten aircraft around Suvarnabhumi climbing in 4000 ft steps from 5000 ft.
pub fn sample_fleet() -> Vec<AircraftRecord> {
    const FLIGHTS: [(&str, &str); 10] = [
        ("885001", "ICT062"),
        ("885002", "ICT081"),
        ("885003", "THA661"),
        ("885004", "AIQ647"),
        ("885005", "BKP146"),
        ("885006", "AIQ3119"),
        ("885007", "TLM532"),
        ("885008", "NOK224"),
        ("885009", "SIA981"),
        ("88500a", "CPA700"),
    ];

    FLIGHTS
        .iter()
        .enumerate()
        .map(|(idx, (hex, flight))| {
            let step = idx as f64;
            mock_aircraft()
                .id(*hex)
                .flight(*flight)
                .position(13.45 + step * 0.05, 100.5 + step * 0.05)
                .altitude(5_000 + 4_000 * idx as i32)
                .speed(180.0 + step * 25.0)
                .track((step * 36.0) % 360.0)
                .build()
        })
        .collect()
}
