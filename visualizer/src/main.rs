use iced::{
    time,
    widget::{button, canvas::Canvas, column, row, scrollable, text, text_input, Column, Container},
    Alignment, Element, Length, Subscription, Task, Theme,
};
use map::AircraftMap;
use serde::Deserialize;
use std::time::{Duration, Instant};
use trackcore::feed::mock::{is_mock, sample_fleet, select_source};
use trackcore::query::{
    altitude_filter_stats, checked_filter_by_altitude, refresh_selection, search_flights,
    AltitudeBound, SearchOutcome,
};
use trackcore::transcript::{tower_transcript, TranscriptCursor, TranscriptEntry};
use trackcore::{AircraftRecord, FeedResponse, Snapshot};

mod map;

const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:9000";

fn main() -> iced::Result {
    env_logger::init();
    iced::application(Tracker::boot, Tracker::update, Tracker::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Tracker) -> String {
    "Live Flight Tracker".into()
}

fn application_subscription(state: &Tracker) -> Subscription<Message> {
    let poll = time::every(Duration::from_secs(1)).map(|_| Message::Tick);
    if state.playback_started.is_some() {
        Subscription::batch(vec![
            poll,
            time::every(Duration::from_millis(100)).map(|_| Message::PlaybackTick),
        ])
    } else {
        poll
    }
}

fn application_theme(_: &Tracker) -> Theme {
    Theme::Dark
}

#[derive(Debug)]
struct Tracker {
    proxy_url: String,
    live: Option<Snapshot>,
    use_mock: bool,
    mock_fleet: Vec<AircraftRecord>,
    show_info: bool,
    show_transcript: bool,
    search_query: String,
    search_error: Option<String>,
    candidates: Vec<AircraftRecord>,
    selected: Option<AircraftRecord>,
    min_input: String,
    max_input: String,
    status: String,
    transcript: Vec<TranscriptEntry>,
    cursor: TranscriptCursor,
    shown: Vec<TranscriptEntry>,
    playback_started: Option<Instant>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    FeedFetched(Result<FeedResponse, String>),
    SearchChanged(String),
    SubmitSearch,
    PickCandidate(String),
    StopFollowing,
    MinChanged(String),
    MaxChanged(String),
    ToggleMock,
    ToggleInfo,
    ToggleTranscript,
    StartTranscript,
    StopTranscript,
    PlaybackTick,
}

impl Tracker {
    fn boot() -> (Self, Task<Message>) {
        let proxy_url =
            std::env::var("TRACKER_PROXY_URL").unwrap_or_else(|_| DEFAULT_PROXY_URL.into());
        let tracker = Tracker {
            proxy_url,
            live: None,
            use_mock: false,
            mock_fleet: sample_fleet(),
            show_info: true,
            show_transcript: true,
            search_query: String::new(),
            search_error: None,
            candidates: Vec::new(),
            selected: None,
            min_input: String::new(),
            max_input: String::new(),
            status: "Waiting for aircraft data...".into(),
            transcript: tower_transcript(),
            cursor: TranscriptCursor::new(),
            shown: Vec::new(),
            playback_started: None,
        };
        let fetch = Task::perform(fetch_feed(tracker.proxy_url.clone()), Message::FeedFetched);
        (tracker, fetch)
    }

    /// Snapshot currently on screen: the mock fleet or the last live one.
    fn displayed(&self) -> Option<Snapshot> {
        select_source(self.use_mock, &self.mock_fleet, self.live.as_ref())
    }

    fn altitude_bound(&self) -> Result<AltitudeBound, String> {
        Ok(AltitudeBound::new(
            parse_altitude(&self.min_input)?,
            parse_altitude(&self.max_input)?,
        ))
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                if state.use_mock {
                    Task::none()
                } else {
                    Task::perform(fetch_feed(state.proxy_url.clone()), Message::FeedFetched)
                }
            }
            Message::FeedFetched(Ok(response)) => {
                state.status = match &response.error {
                    Some(error) => format!("Stale data ({error})"),
                    None => format!("Tracking {} aircraft", response.total),
                };
                state.live = Some(response.into_snapshot());
                state.follow_selection();
                Task::none()
            }
            Message::FeedFetched(Err(err)) => {
                log::warn!("aircraft fetch failed: {}", err);
                state.status = format!("Feed error: {err}");
                Task::none()
            }
            Message::SearchChanged(value) => {
                state.search_query = value;
                Task::none()
            }
            Message::SubmitSearch => {
                state.run_search();
                Task::none()
            }
            Message::PickCandidate(id) => {
                state.selected = state
                    .candidates
                    .iter()
                    .find(|aircraft| aircraft.id == id)
                    .cloned();
                state.candidates.clear();
                Task::none()
            }
            Message::StopFollowing => {
                state.selected = None;
                Task::none()
            }
            Message::MinChanged(value) => {
                state.min_input = value;
                Task::none()
            }
            Message::MaxChanged(value) => {
                state.max_input = value;
                Task::none()
            }
            Message::ToggleMock => {
                state.use_mock = !state.use_mock;
                state.follow_selection();
                Task::none()
            }
            Message::ToggleInfo => {
                state.show_info = !state.show_info;
                Task::none()
            }
            Message::ToggleTranscript => {
                state.show_transcript = !state.show_transcript;
                Task::none()
            }
            Message::StartTranscript => {
                state.cursor.reset();
                state.shown.clear();
                state.playback_started = Some(Instant::now());
                Task::none()
            }
            Message::StopTranscript => {
                state.playback_started = None;
                Task::none()
            }
            Message::PlaybackTick => {
                state.advance_playback();
                Task::none()
            }
        }
    }

    fn run_search(&mut self) {
        let snapshot = self.displayed();
        match search_flights(&self.search_query, snapshot.as_ref()) {
            Ok(SearchOutcome::Selected(aircraft)) => {
                self.selected = Some(aircraft.clone());
                self.candidates.clear();
                self.search_error = None;
            }
            Ok(SearchOutcome::Candidates(candidates)) => {
                self.candidates = candidates.into_iter().cloned().collect();
                self.selected = None;
                self.search_error = None;
            }
            Err(err) => {
                self.candidates.clear();
                self.selected = None;
                self.search_error = Some(err.to_string());
            }
        }
    }

    fn follow_selection(&mut self) {
        let snapshot = self.displayed();
        self.selected = refresh_selection(self.selected.as_ref(), snapshot.as_ref());
    }

    fn advance_playback(&mut self) {
        let Some(started) = self.playback_started else {
            return;
        };
        let elapsed = started.elapsed().as_secs_f64();
        let released = self.cursor.advance(&self.transcript, elapsed);
        self.shown.extend_from_slice(released);
        if self.cursor.is_finished(&self.transcript) {
            self.playback_started = None;
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let snapshot = state.displayed();
        let bound = state.altitude_bound();

        let (visible, filter_note) = match (&snapshot, &bound) {
            (None, _) => (Vec::new(), "No aircraft data".to_string()),
            (Some(snapshot), Err(input_error)) => (snapshot.aircraft.clone(), input_error.clone()),
            (Some(snapshot), Ok(bound)) => {
                match checked_filter_by_altitude(&snapshot.aircraft, *bound) {
                    Ok(filtered) => {
                        let stats = altitude_filter_stats(&snapshot.aircraft, *bound);
                        let note = format!(
                            "Showing {} of {} aircraft ({:.0}%)",
                            stats.filtered_count, stats.total, stats.percentage
                        );
                        (filtered, note)
                    }
                    Err(err) => (snapshot.aircraft.clone(), err.to_string()),
                }
            }
        };

        let origin = snapshot
            .as_ref()
            .map(|snapshot| snapshot.origin)
            .unwrap_or(trackcore::feed::mock::MOCK_ORIGIN);
        let map = Canvas::new(AircraftMap::new(
            visible,
            origin,
            state.selected.as_ref(),
            state.show_info,
        ))
        .width(Length::Fill)
        .height(Length::Fill);

        let source_label = if is_mock(snapshot.as_ref()) {
            "Source: mock data"
        } else {
            "Source: live feed"
        };

        let controls = column![
            text("Flight Search").size(22),
            text_input("Flight ID (e.g. THA661)", &state.search_query)
                .on_input(Message::SearchChanged)
                .on_submit(Message::SubmitSearch)
                .padding(6),
            button("Search").on_press(Message::SubmitSearch).padding(8),
            state.search_panel(),
            text("Altitude Filter (ft)").size(18),
            row![
                text_input("Min", &state.min_input)
                    .on_input(Message::MinChanged)
                    .padding(6),
                text_input("Max", &state.max_input)
                    .on_input(Message::MaxChanged)
                    .padding(6),
            ]
            .spacing(8),
            text(filter_note).size(12),
            row![
                button(if state.use_mock { "Live data" } else { "Mock data" })
                    .on_press(Message::ToggleMock)
                    .padding(8),
                button(if state.show_info { "Hide info" } else { "Show info" })
                    .on_press(Message::ToggleInfo)
                    .padding(8),
                button(if state.show_transcript {
                    "Hide transcript"
                } else {
                    "Show transcript"
                })
                .on_press(Message::ToggleTranscript)
                .padding(8),
            ]
            .spacing(6),
            text(source_label).size(12),
            text(&state.status).size(12),
            state.transcript_panel(),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(360.0));

        let layout = row![controls, map]
            .spacing(12)
            .align_y(Alignment::Start)
            .padding(12);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn search_panel(&self) -> Element<'_, Message> {
        let mut panel = Column::new().spacing(6);

        if let Some(error) = &self.search_error {
            panel = panel.push(text(error).size(13));
        }
        for candidate in &self.candidates {
            panel = panel.push(
                button(text(candidate.callsign().to_string()))
                    .on_press(Message::PickCandidate(candidate.id.clone()))
                    .width(Length::Fill)
                    .padding(6),
            );
        }
        if let Some(selected) = &self.selected {
            panel = panel
                .push(
                    text(format!(
                        "Following {} ({}): {} ft, {:.0} kt, {:.0}°",
                        selected.callsign(),
                        selected.id,
                        selected.altitude_ft,
                        selected.ground_speed_kt,
                        selected.track_deg
                    ))
                    .size(13),
                )
                .push(
                    button("Stop following")
                        .on_press(Message::StopFollowing)
                        .padding(6),
                );
        }
        panel.into()
    }

    fn transcript_panel(&self) -> Element<'_, Message> {
        if !self.show_transcript {
            return Column::new().into();
        }

        let lines = if self.shown.is_empty() {
            Column::new().push(text("No transmissions yet").size(12))
        } else {
            self.shown
                .iter()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(
                        text(format!("[{}] {}: {}", entry.offset, entry.speaker, entry.text))
                            .size(12),
                    )
                })
        };

        let next = match (
            self.playback_started,
            self.cursor
                .time_until_next(&self.transcript, self.elapsed_playback()),
        ) {
            (Some(_), Some(wait)) => format!("next in {wait:.0}s"),
            (Some(_), None) | (None, _) => String::new(),
        };

        column![
            text("Radio Transcript").size(18),
            row![
                button("Start").on_press(Message::StartTranscript).padding(6),
                button("Stop").on_press(Message::StopTranscript).padding(6),
                text(format!(
                    "{:.0}% {}",
                    self.cursor.progress(&self.transcript),
                    next
                ))
                .size(12),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
            Container::new(scrollable(lines).height(Length::Fixed(180.0))).padding(6),
        ]
        .spacing(6)
        .into()
    }

    fn elapsed_playback(&self) -> f64 {
        self.playback_started
            .map(|started| started.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// Empty input means "no bound"; anything else must be a whole number.
fn parse_altitude(input: &str) -> Result<Option<i32>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse()
        .map(Some)
        .map_err(|_| format!("Altitude must be a whole number: {input:?}"))
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

async fn fetch_feed(proxy_url: String) -> Result<FeedResponse, String> {
    let url = format!("{}/api/aircraft", proxy_url.trim_end_matches('/'));
    let response = reqwest::get(url).await.map_err(|e| e.to_string())?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|body| body.error)
            .unwrap_or(body);
        return Err(format!("{}: {}", status, message));
    }
    response
        .json::<FeedResponse>()
        .await
        .map_err(|e| e.to_string())
}
