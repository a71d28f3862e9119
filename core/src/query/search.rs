use crate::feed::{AircraftRecord, Snapshot};
use crate::prelude::SearchError;

/// Successful result of a flight-number search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    /// A flight number matched exactly (case-insensitive).
    Selected(&'a AircraftRecord),
    /// No exact match; these flight numbers start with the query.
    Candidates(Vec<&'a AircraftRecord>),
}

impl<'a> SearchOutcome<'a> {
    pub fn selected(&self) -> Option<&'a AircraftRecord> {
        match self {
            SearchOutcome::Selected(aircraft) => Some(*aircraft),
            SearchOutcome::Candidates(_) => None,
        }
    }

    pub fn candidates(&self) -> &[&'a AircraftRecord] {
        match self {
            SearchOutcome::Selected(_) => &[],
            SearchOutcome::Candidates(candidates) => candidates.as_slice(),
        }
    }
}

/// Looks up aircraft by flight number.
///
/// An exact match wins over prefix matches; when several aircraft share the
/// same flight number the first one in snapshot order is selected.
pub fn search_flights<'a>(
    query: &str,
    snapshot: Option<&'a Snapshot>,
) -> Result<SearchOutcome<'a>, SearchError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    let snapshot = snapshot.ok_or(SearchError::DataUnavailable)?;
    let needle = query.to_lowercase();

    if let Some(exact) = snapshot
        .aircraft
        .iter()
        .find(|aircraft| aircraft.normalized_flight().as_deref() == Some(needle.as_str()))
    {
        return Ok(SearchOutcome::Selected(exact));
    }

    let candidates: Vec<&AircraftRecord> = snapshot
        .aircraft
        .iter()
        .filter(|aircraft| {
            aircraft
                .normalized_flight()
                .is_some_and(|flight| flight.starts_with(&needle))
        })
        .collect();

    if candidates.is_empty() {
        Err(SearchError::NoMatch)
    } else {
        Ok(SearchOutcome::Candidates(candidates))
    }
}

/// Re-reads a followed aircraft from a fresh snapshot by its hex id.
///
/// Keeps the previous record when there is nothing newer to show.
pub fn refresh_selection(
    selected: Option<&AircraftRecord>,
    snapshot: Option<&Snapshot>,
) -> Option<AircraftRecord> {
    let selected = selected?;
    let latest = snapshot
        .and_then(|snapshot| snapshot.find_by_id(&selected.id))
        .unwrap_or(selected);
    Some(latest.clone())
}
