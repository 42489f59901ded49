//! In-memory metro network and point-to-point route queries.
//!
//! The network is built once from validated segment records and is
//! read-only afterwards, so any number of queries may run against it
//! concurrently.

pub mod error;
pub mod export;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::{NetworkConfig, create_metro_network};
pub use model::{Edge, MetroNetwork, SegmentRecord};
pub use routing::{Criterion, Path, RouteError, Stop, TripSummary};

/// Travel time of a segment, in minutes
pub type Time = u32;
/// Fare of a segment
pub type Cost = u32;
/// Accumulated weight along a path
pub type Weight = u64;
