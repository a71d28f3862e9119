use serde::{Deserialize, Serialize};
use trackcore::query::AltitudeStats;
use trackcore::telemetry::RefreshMetrics;
use trackcore::transcript::TranscriptEntry;
use trackcore::{AircraftRecord, OriginLocation};

#[derive(Debug, Serialize)]
pub struct StatusReply {
    pub message: String,
    pub timestamp: String,
    pub source: String,
    pub metrics: RefreshMetrics,
}

/// Body served when no snapshot has ever been fetched.
#[derive(Debug, Serialize)]
pub struct UnavailableReply {
    pub error: String,
    pub cached: bool,
    pub location: OriginLocation,
}

#[derive(Debug, Serialize)]
pub struct ErrorReply {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct SearchReply<'a> {
    pub selected: Option<&'a AircraftRecord>,
    pub candidates: Vec<&'a AircraftRecord>,
}

#[derive(Debug, Serialize)]
pub struct AltitudeReply {
    pub aircraft: Vec<AircraftRecord>,
    pub stats: AltitudeStats,
}

#[derive(Debug, Serialize)]
pub struct TranscriptReply<'a> {
    pub emitted: &'a [TranscriptEntry],
    pub new_index: usize,
    pub progress: f64,
    pub time_until_next: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct TranscribeReply {
    pub success: bool,
    #[serde(flatten)]
    pub body: TranscribeBody,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TranscribeBody {
    Done {
        source: String,
        filename: String,
        transcript: String,
        confidence: f32,
        timestamp: String,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AltitudeParams {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TranscriptParams {
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub index: usize,
}
