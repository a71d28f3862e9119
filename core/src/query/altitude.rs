use crate::feed::AircraftRecord;
use crate::prelude::AltitudeError;
use serde::{Deserialize, Serialize};

/// Inclusive altitude window in feet.
///
/// A side that is `None` or `0` places no constraint; zero is never a real
/// filter value here, so it doubles as "unset".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AltitudeBound {
    #[serde(default)]
    pub min: Option<i32>,
    #[serde(default)]
    pub max: Option<i32>,
}

impl AltitudeBound {
    pub fn new(min: Option<i32>, max: Option<i32>) -> Self {
        Self { min, max }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    fn effective_min(&self) -> Option<i32> {
        self.min.filter(|min| *min > 0)
    }

    fn effective_max(&self) -> Option<i32> {
        self.max.filter(|max| *max > 0)
    }

    pub fn is_unbounded(&self) -> bool {
        self.effective_min().is_none() && self.effective_max().is_none()
    }

    /// Whether an aircraft at `altitude_ft` passes this bound.
    ///
    /// An inverted window (`min > max`) keeps only the lower edge.
    pub fn admits(&self, altitude_ft: i32) -> bool {
        match (self.effective_min(), self.effective_max()) {
            (Some(min), Some(max)) if min > max => altitude_ft >= min,
            (Some(min), Some(max)) => (min..=max).contains(&altitude_ft),
            (Some(min), None) => altitude_ft >= min,
            (None, Some(max)) => altitude_ft <= max,
            (None, None) => true,
        }
    }
}

/// Filter summary shown next to the altitude inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudeStats {
    pub total: usize,
    pub filtered_count: usize,
    pub percentage: f64,
}

/// Keeps aircraft inside `bound`, preserving input order.
pub fn filter_by_altitude(
    aircraft: &[AircraftRecord],
    bound: AltitudeBound,
) -> Vec<AircraftRecord> {
    if bound.is_unbounded() {
        return aircraft.to_vec();
    }
    aircraft
        .iter()
        .filter(|record| bound.admits(record.altitude_ft))
        .cloned()
        .collect()
}

/// Advisory check of a user-entered bound; [`filter_by_altitude`] never
/// rejects on its own.
pub fn validate_altitude_bound(bound: AltitudeBound) -> Result<(), AltitudeError> {
    if let (Some(min), Some(max)) = (bound.effective_min(), bound.effective_max()) {
        if min > max {
            return Err(AltitudeError::MinExceedsMax);
        }
    }
    if bound.min.is_some_and(|min| min < 0) {
        return Err(AltitudeError::NegativeMin);
    }
    if bound.max.is_some_and(|max| max < 0) {
        return Err(AltitudeError::NegativeMax);
    }
    Ok(())
}

/// Validates `bound` and only then filters; what the proxy and viewer use.
pub fn checked_filter_by_altitude(
    aircraft: &[AircraftRecord],
    bound: AltitudeBound,
) -> Result<Vec<AircraftRecord>, AltitudeError> {
    validate_altitude_bound(bound)?;
    Ok(filter_by_altitude(aircraft, bound))
}

pub fn altitude_filter_stats(aircraft: &[AircraftRecord], bound: AltitudeBound) -> AltitudeStats {
    let total = aircraft.len();
    let filtered_count = aircraft
        .iter()
        .filter(|record| bound.admits(record.altitude_ft))
        .count();
    let percentage = if total > 0 {
        filtered_count as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    AltitudeStats {
        total,
        filtered_count,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::mock::{mock_aircraft, sample_fleet};
    use proptest::prelude::*;

    fn altitudes(aircraft: &[AircraftRecord]) -> Vec<i32> {
        aircraft.iter().map(|ac| ac.altitude_ft).collect()
    }

    fn bound(min: Option<i32>, max: Option<i32>) -> AltitudeBound {
        AltitudeBound::new(min, max)
    }

    #[test]
    fn filters_by_both_edges() {
        let fleet: Vec<_> = [5_000, 9_000, 13_000, 17_000, 21_000]
            .iter()
            .enumerate()
            .map(|(idx, alt)| mock_aircraft().id(format!("{idx:06}")).altitude(*alt).build())
            .collect();
        let result = filter_by_altitude(&fleet, bound(Some(10_000), Some(20_000)));
        assert_eq!(altitudes(&result), vec![13_000, 17_000]);
    }

    #[test]
    fn filters_by_single_edge() {
        let fleet = sample_fleet();
        assert_eq!(
            altitudes(&filter_by_altitude(&fleet, bound(Some(20_000), None))),
            vec![21_000, 25_000, 29_000, 33_000, 37_000, 41_000]
        );
        assert_eq!(
            altitudes(&filter_by_altitude(&fleet, bound(None, Some(10_000)))),
            vec![5_000, 9_000]
        );
    }

    #[test]
    fn zero_means_unset() {
        let fleet = sample_fleet();
        assert_eq!(filter_by_altitude(&fleet, bound(Some(0), Some(0))), fleet);
        assert_eq!(
            altitudes(&filter_by_altitude(&fleet, bound(Some(0), Some(10_000)))),
            vec![5_000, 9_000]
        );
        assert!(filter_by_altitude(&fleet, bound(Some(10_000), Some(0)))
            .iter()
            .all(|ac| ac.altitude_ft >= 10_000));
    }

    #[test]
    fn edges_are_inclusive() {
        let result = filter_by_altitude(&sample_fleet(), bound(Some(21_000), Some(21_000)));
        assert_eq!(altitudes(&result), vec![21_000]);
    }

    #[test]
    fn inverted_bound_keeps_lower_edge_only() {
        let result = filter_by_altitude(&sample_fleet(), bound(Some(30_000), Some(20_000)));
        assert_eq!(altitudes(&result), vec![33_000, 37_000, 41_000]);
    }

    #[test]
    fn validation_reports_first_problem() {
        assert_eq!(validate_altitude_bound(bound(Some(10_000), Some(20_000))), Ok(()));
        assert_eq!(
            validate_altitude_bound(bound(Some(30_000), Some(20_000))),
            Err(AltitudeError::MinExceedsMax)
        );
        assert_eq!(
            validate_altitude_bound(bound(Some(-1), Some(10_000))),
            Err(AltitudeError::NegativeMin)
        );
        assert_eq!(
            validate_altitude_bound(bound(Some(10_000), Some(-100))),
            Err(AltitudeError::NegativeMax)
        );
        assert_eq!(validate_altitude_bound(bound(None, Some(10_000))), Ok(()));
        assert_eq!(validate_altitude_bound(AltitudeBound::unbounded()), Ok(()));
    }

    #[test]
    fn checked_filter_rejects_inverted_bound() {
        assert_eq!(
            checked_filter_by_altitude(&sample_fleet(), bound(Some(30_000), Some(20_000))),
            Err(AltitudeError::MinExceedsMax)
        );
        assert_eq!(
            checked_filter_by_altitude(&sample_fleet(), bound(Some(10_000), Some(20_000)))
                .map(|result| result.len()),
            Ok(2)
        );
    }

    #[test]
    fn stats_report_share_of_fleet() {
        let fleet = sample_fleet();
        let stats = altitude_filter_stats(&fleet, bound(Some(10_000), Some(20_000)));
        assert_eq!(stats.total, 10);
        assert_eq!(stats.filtered_count, 2);
        assert_eq!(stats.percentage, 20.0);

        let stats = altitude_filter_stats(&fleet, AltitudeBound::unbounded());
        assert_eq!(stats.percentage, 100.0);

        let stats = altitude_filter_stats(&[], bound(Some(10_000), Some(20_000)));
        assert_eq!((stats.total, stats.filtered_count, stats.percentage), (0, 0, 0.0));
    }

    fn fleet_strategy() -> impl Strategy<Value = Vec<AircraftRecord>> {
        prop::collection::vec(0..45_000i32, 0..40).prop_map(|alts| {
            alts.into_iter()
                .enumerate()
                .map(|(idx, alt)| mock_aircraft().id(format!("{idx:06x}")).altitude(alt).build())
                .collect()
        })
    }

    fn valid_bound_strategy() -> impl Strategy<Value = AltitudeBound> {
        (prop::option::of(0..45_000i32), prop::option::of(0..45_000i32)).prop_map(|(a, b)| {
            match (a, b) {
                (Some(a), Some(b)) if a > 0 && b > 0 => bound(Some(a.min(b)), Some(a.max(b))),
                _ => bound(a, b),
            }
        })
    }

    proptest! {
        #[test]
        fn unbounded_filter_is_identity(fleet in fleet_strategy()) {
            prop_assert_eq!(filter_by_altitude(&fleet, AltitudeBound::unbounded()), fleet);
        }

        #[test]
        fn filter_is_order_preserving_subset(
            fleet in fleet_strategy(),
            bound in valid_bound_strategy(),
        ) {
            let result = filter_by_altitude(&fleet, bound);
            let mut remaining = fleet.iter();
            for kept in &result {
                prop_assert!(remaining.any(|candidate| candidate == kept));
            }
        }

        #[test]
        fn single_record_membership_matches_bound(
            altitude in 0..45_000i32,
            bound in valid_bound_strategy(),
        ) {
            let record = mock_aircraft().altitude(altitude).build();
            let kept = !filter_by_altitude(&[record], bound).is_empty();
            let above = bound.min.filter(|m| *m > 0).map_or(true, |min| altitude >= min);
            let below = bound.max.filter(|m| *m > 0).map_or(true, |max| altitude <= max);
            prop_assert_eq!(kept, above && below);
        }
    }
}
