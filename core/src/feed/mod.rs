pub mod aircraft;
pub mod contract;
pub mod mock;
pub mod upstream;

pub use aircraft::{AircraftRecord, OriginLocation, Snapshot};
pub use contract::{FeedResponse, MOCK_MESSAGE};
pub use upstream::{upstream_url, UpstreamResponse};
