//! This module is responsible for reading delimited segment data
//! and building the metro network from it.

mod builder;
mod config;
mod parser;

pub use builder::create_metro_network;
pub use config::NetworkConfig;
pub use parser::{LoadReport, RecordRejection, RejectReason, parse_segments};
