//! Core data model and query logic for the live flight tracker.
//!
//! Everything here is synchronous and free of network or disk access: the
//! proxy feeds snapshots in, the viewer asks questions of them.

pub mod feed;
pub mod prelude;
pub mod query;
pub mod store;
pub mod telemetry;
pub mod transcript;

pub use feed::{AircraftRecord, FeedResponse, OriginLocation, Snapshot};
pub use prelude::{AltitudeError, FeedError, OffsetError, SearchError, TranscriptError};
pub use store::SnapshotStore;
