//! Data model for the metro network
//!
//! Contains station, segment and adjacency types.

pub mod network;
pub mod types;

pub use network::MetroNetwork;
pub use types::{Edge, SegmentRecord};
