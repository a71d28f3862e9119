pub mod altitude;
pub mod search;

pub use altitude::{
    altitude_filter_stats, checked_filter_by_altitude, filter_by_altitude,
    validate_altitude_bound, AltitudeBound, AltitudeStats,
};
pub use search::{refresh_selection, search_flights, SearchOutcome};
