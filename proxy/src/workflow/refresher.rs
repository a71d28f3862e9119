use crate::workflow::source::FeedSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use trackcore::SnapshotStore;

/// Refreshes `store` from `source` once per `interval`, forever.
///
/// A slow upstream delays only its own tick; readers keep the previous
/// snapshot meanwhile.
pub async fn run_refresh_loop(
    store: Arc<SnapshotStore>,
    source: Arc<FeedSource>,
    interval: Duration,
) {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        refresh_once(&store, &source).await;
    }
}

pub async fn refresh_once(store: &SnapshotStore, source: &FeedSource) {
    store.refresh(source.fetch().await);
}
