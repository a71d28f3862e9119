use crate::generator::fleet::{advance_fleet, build_fleet, FleetConfig};
use crate::workflow::config::ProxyConfig;
use anyhow::Context;
use std::time::{Duration, Instant};
use trackcore::feed::{upstream_url, UpstreamResponse, MOCK_MESSAGE};
use trackcore::prelude::{FeedError, FeedResult};
use trackcore::{AircraftRecord, OriginLocation, Snapshot};

/// Where snapshots come from.
pub enum FeedSource {
    Live(LiveFeed),
    Synthetic(SyntheticFeed),
}

impl FeedSource {
    pub fn from_config(config: &ProxyConfig) -> anyhow::Result<Self> {
        match &config.mock {
            Some(fleet) => Ok(FeedSource::Synthetic(SyntheticFeed::new(
                fleet,
                config.origin(),
            ))),
            None => LiveFeed::new(
                &config.upstream_base,
                config.origin(),
                config.request_timeout(),
            )
            .map(FeedSource::Live),
        }
    }

    pub async fn fetch(&self) -> FeedResult<Snapshot> {
        match self {
            FeedSource::Live(feed) => feed.fetch().await,
            FeedSource::Synthetic(feed) => Ok(feed.snapshot()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            FeedSource::Live(feed) => format!("live feed {}", feed.url),
            FeedSource::Synthetic(feed) => format!("synthetic fleet of {}", feed.base.len()),
        }
    }
}

/// Polls the public ADS-B aggregator over HTTP.
pub struct LiveFeed {
    client: reqwest::Client,
    url: String,
    origin: OriginLocation,
}

impl LiveFeed {
    pub fn new(base: &str, origin: OriginLocation, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building upstream HTTP client")?;
        Ok(Self {
            client,
            url: upstream_url(base, &origin),
            origin,
        })
    }

    async fn fetch(&self) -> FeedResult<Snapshot> {
        let upstream = |err: reqwest::Error| FeedError::Upstream(err.to_string());
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(upstream)?
            .bytes()
            .await
            .map_err(upstream)?;
        Ok(UpstreamResponse::parse(&body)?.into_snapshot(self.origin))
    }
}

/// Deterministic fleet that drifts along its tracks as time passes.
pub struct SyntheticFeed {
    base: Vec<AircraftRecord>,
    origin: OriginLocation,
    started: Instant,
}

impl SyntheticFeed {
    pub fn new(config: &FleetConfig, origin: OriginLocation) -> Self {
        Self {
            base: build_fleet(config, &origin),
            origin,
            started: Instant::now(),
        }
    }

    fn snapshot(&self) -> Snapshot {
        let elapsed = self.started.elapsed().as_secs_f64();
        let now = chrono::Utc::now().timestamp_millis() as f64 / 1000.0;
        Snapshot::new(advance_fleet(&self.base, elapsed), now, self.origin, MOCK_MESSAGE)
    }
}
