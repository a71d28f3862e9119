use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use trackcore::feed::mock::mock_aircraft;
use trackcore::{AircraftRecord, OriginLocation};

const NM_PER_DEGREE: f64 = 60.0;

/// Configuration for generating a synthetic fleet around the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub count: usize,
    pub seed: u64,
    /// Maximum offset from the origin, in degrees.
    pub spread_deg: f64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            count: 25,
            seed: 0,
            spread_deg: 0.5,
        }
    }
}

/// Builds the fleet as it stands at `t = 0`.
pub fn build_fleet(config: &FleetConfig, origin: &OriginLocation) -> Vec<AircraftRecord> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let spread = config.spread_deg.abs().max(f64::EPSILON);

    (0..config.count)
        .map(|idx| {
            let lat_offset = rng.gen_range(-spread..spread);
            let lon_offset = rng.gen_range(-spread..spread);
            mock_aircraft()
                .id(format!("00000{:03x}", idx))
                .flight(format!("TST{:03}", idx))
                .position(origin.latitude + lat_offset, origin.longitude + lon_offset)
                .altitude(rng.gen_range(5_000..40_000))
                .speed(f64::from(rng.gen_range(150u32..450)))
                .track(f64::from(rng.gen_range(0u32..360)))
                .build()
        })
        .collect()
}

/// Moves every aircraft along its track for `elapsed_secs` at ground speed.
pub fn advance_fleet(fleet: &[AircraftRecord], elapsed_secs: f64) -> Vec<AircraftRecord> {
    fleet
        .iter()
        .map(|aircraft| {
            let distance_nm = aircraft.ground_speed_kt * elapsed_secs / 3600.0;
            let heading = aircraft.track_deg.to_radians();
            let latitude = aircraft.latitude + distance_nm * heading.cos() / NM_PER_DEGREE;
            let lon_scale = latitude.to_radians().cos().max(1e-6);
            let longitude =
                aircraft.longitude + distance_nm * heading.sin() / (NM_PER_DEGREE * lon_scale);

            AircraftRecord {
                latitude,
                longitude,
                ..aircraft.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> OriginLocation {
        OriginLocation::new(13.7, 100.76, 75.0)
    }

    #[test]
    fn generator_builds_requested_count_within_spread() {
        let config = FleetConfig {
            count: 40,
            seed: 7,
            spread_deg: 0.25,
        };
        let fleet = build_fleet(&config, &origin());

        assert_eq!(fleet.len(), 40);
        assert_eq!(fleet[10].id, "0000000a");
        assert_eq!(fleet[10].flight_number.as_deref(), Some("TST010"));
        assert!(fleet.iter().all(|ac| (ac.latitude - 13.7).abs() <= 0.25));
        assert!(fleet
            .iter()
            .all(|ac| (5_000..40_000).contains(&ac.altitude_ft)));
    }

    #[test]
    fn same_seed_replays_same_fleet() {
        let config = FleetConfig::default();
        assert_eq!(build_fleet(&config, &origin()), build_fleet(&config, &origin()));
    }

    #[test]
    fn advancing_moves_along_track() {
        let northbound = mock_aircraft().position(13.0, 100.0).speed(360.0).track(0.0).build();
        let moved = advance_fleet(&[northbound], 600.0);

        assert!((moved[0].latitude - 13.0 - 1.0).abs() < 1e-9);
        assert!((moved[0].longitude - 100.0).abs() < 1e-9);
    }
}
