//! Owned holder of the current snapshot, refreshed by the feed proxy.

use crate::feed::Snapshot;
use crate::prelude::FeedResult;
use crate::telemetry::{LogManager, MetricsRecorder, RefreshMetrics};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

pub type SubscriptionId = usize;

type Subscriber = Arc<dyn Fn(&Arc<Snapshot>) + Send + Sync>;

#[derive(Debug, Default)]
struct RefreshStatus {
    last_updated: Option<Instant>,
    last_error: Option<String>,
}

/// Holds the latest [`Snapshot`] behind a single reference swap.
///
/// Readers clone an `Arc` and never observe a half-written snapshot. A
/// failed refresh leaves the previous snapshot in place and records why.
pub struct SnapshotStore {
    current: RwLock<Option<Arc<Snapshot>>>,
    status: RwLock<RefreshStatus>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: Mutex<SubscriptionId>,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
            status: RwLock::new(RefreshStatus::default()),
            subscribers: Mutex::new(Vec::new()),
            next_subscription: Mutex::new(0),
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("store"),
        }
    }

    pub fn get(&self) -> Option<Arc<Snapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies the outcome of one fetch.
    ///
    /// On success the new snapshot supersedes the old one and subscribers
    /// are notified; on failure only the error is recorded.
    pub fn refresh(&self, outcome: FeedResult<Snapshot>) {
        match outcome {
            Ok(snapshot) => {
                let count = snapshot.len();
                let snapshot = Arc::new(snapshot);
                *self.current.write().unwrap_or_else(PoisonError::into_inner) =
                    Some(snapshot.clone());
                {
                    let mut status = self.status.write().unwrap_or_else(PoisonError::into_inner);
                    status.last_updated = Some(Instant::now());
                    status.last_error = None;
                }
                self.metrics.record_refresh();
                self.logger
                    .record(&format!("aircraft data updated: {} entries", count));
                self.notify(&snapshot);
            }
            Err(err) => {
                self.status
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .last_error = Some(err.to_string());
                self.metrics.record_failure();
                self.logger
                    .warn(&format!("refresh failed, keeping previous snapshot: {}", err));
            }
        }
    }

    pub fn last_updated(&self) -> Option<Instant> {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last_updated
    }

    /// Error from the most recent refresh, cleared by the next success.
    pub fn last_error(&self) -> Option<String> {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last_error
            .clone()
    }

    /// True when nothing has been loaded yet or the snapshot is older than `max_age`.
    pub fn is_stale(&self, max_age: Duration) -> bool {
        self.last_updated()
            .map_or(true, |updated| updated.elapsed() > max_age)
    }

    /// Registers `callback` to run after every successful refresh.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Arc<Snapshot>) + Send + Sync + 'static,
    {
        let id = {
            let mut next = self
                .next_subscription
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *next += 1;
            *next
        };
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    pub fn stats(&self) -> RefreshMetrics {
        self.metrics.snapshot()
    }

    /// Callbacks run without the subscriber lock held, so they may
    /// subscribe or unsubscribe themselves.
    fn notify(&self, snapshot: &Arc<Snapshot>) {
        let callbacks: Vec<Subscriber> = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in callbacks {
            callback(snapshot);
        }
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::mock::{mock_snapshot, sample_fleet};
    use crate::prelude::FeedError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn empty_store_is_stale() {
        let store = SnapshotStore::new();
        assert!(store.get().is_none());
        assert!(store.last_updated().is_none());
        assert!(store.is_stale(Duration::from_secs(60)));
    }

    #[test]
    fn refresh_replaces_snapshot_wholesale() {
        let store = SnapshotStore::new();
        store.refresh(Ok(mock_snapshot(sample_fleet(), None)));
        let first = store.get().unwrap();
        assert_eq!(first.len(), 10);

        store.refresh(Ok(mock_snapshot(sample_fleet()[..3].to_vec(), None)));
        assert_eq!(store.get().unwrap().len(), 3);
        assert_eq!(first.len(), 10);
        assert!(!store.is_stale(Duration::from_secs(60)));
    }

    #[test]
    fn failed_refresh_keeps_previous_snapshot() {
        let store = SnapshotStore::new();
        store.refresh(Ok(mock_snapshot(sample_fleet(), None)));
        store.refresh(Err(FeedError::Upstream("connection refused".into())));

        assert_eq!(store.get().unwrap().len(), 10);
        assert_eq!(
            store.last_error().as_deref(),
            Some("upstream request failed: connection refused")
        );
        assert_eq!(store.stats().refreshes, 1);
        assert_eq!(store.stats().failures, 1);

        store.refresh(Ok(mock_snapshot(Vec::new(), None)));
        assert!(store.last_error().is_none());
    }

    #[test]
    fn subscribers_see_each_successful_refresh() {
        let store = SnapshotStore::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let id = store.subscribe(move |snapshot| {
            counter.fetch_add(snapshot.len(), Ordering::SeqCst);
        });

        store.refresh(Ok(mock_snapshot(sample_fleet(), None)));
        store.refresh(Err(FeedError::Upstream("timeout".into())));
        assert_eq!(seen.load(Ordering::SeqCst), 10);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.refresh(Ok(mock_snapshot(sample_fleet(), None)));
        assert_eq!(seen.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn subscriber_can_unsubscribe_itself_during_refresh() {
        let store = Arc::new(SnapshotStore::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let own_id = Arc::new(Mutex::new(None::<SubscriptionId>));

        let inner = store.clone();
        let counter = calls.clone();
        let slot = own_id.clone();
        let id = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            if let Some(id) = *slot.lock().unwrap() {
                inner.unsubscribe(id);
            }
        });
        *own_id.lock().unwrap() = Some(id);

        let (done_tx, done_rx) = std::sync::mpsc::channel();
        let refresher = store.clone();
        std::thread::spawn(move || {
            refresher.refresh(Ok(mock_snapshot(sample_fleet(), None)));
            refresher.refresh(Ok(mock_snapshot(sample_fleet(), None)));
            let _ = done_tx.send(());
        });

        done_rx
            .recv_timeout(Duration::from_secs(3))
            .expect("refresh should not block on a re-entrant subscriber");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!store.unsubscribe(id));
    }
}
