use crate::bridge::handlers::{self, BridgeState};
use crate::bridge::model::{AltitudeParams, SearchParams, TranscriptParams};
use std::convert::Infallible;
use warp::Filter;

fn with_state(
    state: BridgeState,
) -> impl Filter<Extract = (BridgeState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Every route the tracker UI talks to.
pub fn routes(
    state: BridgeState,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let status = warp::path::end()
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::status);

    let aircraft = warp::path!("api" / "aircraft")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::aircraft);

    let search = warp::path!("api" / "search")
        .and(warp::get())
        .and(warp::query::<SearchParams>())
        .and(with_state(state.clone()))
        .and_then(handlers::search);

    let altitude = warp::path!("api" / "altitude")
        .and(warp::get())
        .and(warp::query::<AltitudeParams>())
        .and(with_state(state.clone()))
        .and_then(handlers::altitude);

    let transcript = warp::path!("api" / "transcript")
        .and(warp::get())
        .and(warp::query::<TranscriptParams>())
        .and(with_state(state.clone()))
        .and_then(handlers::transcript);

    let transcribe = warp::path!("api" / "transcribe")
        .and(warp::get())
        .and(with_state(state))
        .and_then(handlers::transcribe);

    let cors = warp::cors().allow_any_origin().allow_method("GET");

    status
        .or(aircraft)
        .or(search)
        .or(altitude)
        .or(transcript)
        .or(transcribe)
        .with(cors)
        .with(warp::log("feed_proxy::bridge"))
}
