use crate::bridge::model::{
    AltitudeParams, AltitudeReply, ErrorReply, SearchParams, SearchReply, StatusReply,
    TranscribeBody, TranscribeReply, TranscriptParams, TranscriptReply, UnavailableReply,
};
use crate::workflow::config::ProxyConfig;
use crate::workflow::refresher::refresh_once;
use crate::workflow::source::FeedSource;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use trackcore::prelude::SearchError;
use trackcore::query::{
    altitude_filter_stats, checked_filter_by_altitude, search_flights, AltitudeBound,
    SearchOutcome,
};
use trackcore::transcript::{messages_up_to, progress, time_until_next, TranscriptEntry};
use trackcore::{FeedResponse, SnapshotStore};
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

const NO_DATA: &str = "No ADS-B data available or API request failed";
const MOCK_TRANSCRIPT: &str = "Tower to flight 123, you are cleared for takeoff runway 27.";

pub type Reply = WithStatus<Json>;

/// Everything the HTTP handlers share.
#[derive(Clone)]
pub struct BridgeState {
    pub store: Arc<SnapshotStore>,
    pub source: Arc<FeedSource>,
    pub config: Arc<ProxyConfig>,
    pub transcript: Arc<Vec<TranscriptEntry>>,
}

fn reply<T: Serialize>(body: &T, status: StatusCode) -> Reply {
    warp::reply::with_status(warp::reply::json(body), status)
}

fn error_reply(message: impl Into<String>, status: StatusCode) -> Reply {
    reply(
        &ErrorReply {
            error: message.into(),
        },
        status,
    )
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

pub async fn status(state: BridgeState) -> Result<Reply, Infallible> {
    let body = StatusReply {
        message: "API server is running".into(),
        timestamp: now_rfc3339(),
        source: state.source.describe(),
        metrics: state.store.stats(),
    };
    Ok(reply(&body, StatusCode::OK))
}

pub async fn aircraft(state: BridgeState) -> Result<Reply, Infallible> {
    if state.store.is_stale(state.config.max_age()) {
        refresh_once(&state.store, &state.source).await;
    }

    match state.store.get() {
        Some(snapshot) => {
            let body = FeedResponse::from_snapshot(&snapshot, true)
                .with_error(state.store.last_error());
            Ok(reply(&body, StatusCode::OK))
        }
        None => {
            let body = UnavailableReply {
                error: state.store.last_error().unwrap_or_else(|| NO_DATA.into()),
                cached: true,
                location: state.config.origin(),
            };
            Ok(reply(&body, StatusCode::SERVICE_UNAVAILABLE))
        }
    }
}

fn search_status(err: SearchError) -> StatusCode {
    match err {
        SearchError::EmptyQuery => StatusCode::BAD_REQUEST,
        SearchError::DataUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        SearchError::NoMatch => StatusCode::NOT_FOUND,
    }
}

pub async fn search(params: SearchParams, state: BridgeState) -> Result<Reply, Infallible> {
    let snapshot = state.store.get();
    let response = match search_flights(&params.q, snapshot.as_deref()) {
        Ok(SearchOutcome::Selected(aircraft)) => reply(
            &SearchReply {
                selected: Some(aircraft),
                candidates: Vec::new(),
            },
            StatusCode::OK,
        ),
        Ok(SearchOutcome::Candidates(candidates)) => reply(
            &SearchReply {
                selected: None,
                candidates,
            },
            StatusCode::OK,
        ),
        Err(err) => error_reply(err.to_string(), search_status(err)),
    };
    Ok(response)
}

pub async fn altitude(params: AltitudeParams, state: BridgeState) -> Result<Reply, Infallible> {
    let Some(snapshot) = state.store.get() else {
        return Ok(error_reply(NO_DATA, StatusCode::SERVICE_UNAVAILABLE));
    };
    let bound = AltitudeBound::new(params.min, params.max);

    let response = match checked_filter_by_altitude(&snapshot.aircraft, bound) {
        Ok(aircraft) => reply(
            &AltitudeReply {
                aircraft,
                stats: altitude_filter_stats(&snapshot.aircraft, bound),
            },
            StatusCode::OK,
        ),
        Err(err) => error_reply(err.to_string(), StatusCode::BAD_REQUEST),
    };
    Ok(response)
}

pub async fn transcript(params: TranscriptParams, state: BridgeState) -> Result<Reply, Infallible> {
    let messages = state.transcript.as_slice();
    let step = messages_up_to(messages, params.time, params.index);
    let body = TranscriptReply {
        emitted: step.emitted,
        new_index: step.new_index,
        progress: progress(step.new_index, messages.len()),
        time_until_next: time_until_next(messages, params.time, step.new_index),
    };
    Ok(reply(&body, StatusCode::OK))
}

pub async fn transcribe(state: BridgeState) -> Result<Reply, Infallible> {
    let audio = state
        .config
        .audio_path
        .as_ref()
        .filter(|path| path.is_file());
    let Some(audio) = audio else {
        let body = TranscribeReply {
            success: false,
            body: TranscribeBody::Failed {
                message: "Audio file not found for mock transcription.".into(),
            },
        };
        return Ok(reply(&body, StatusCode::NOT_FOUND));
    };

    log::info!("mock transcribing {}", audio.display());
    tokio::time::sleep(state.config.transcribe_delay()).await;

    let filename = audio
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let body = TranscribeReply {
        success: true,
        body: TranscribeBody::Done {
            source: "mock_audio".into(),
            filename,
            transcript: MOCK_TRANSCRIPT.into(),
            confidence: 0.96,
            timestamp: now_rfc3339(),
        },
    };
    Ok(reply(&body, StatusCode::OK))
}
