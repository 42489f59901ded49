//! Point-to-point route queries over the metro network
//!
//! Three criteria are supported: fewest stops (breadth-first search),
//! lowest cumulative cost and lowest cumulative time (Dijkstra over the
//! respective edge field). Queries never mutate the network.

mod bfs;
mod dijkstra;
mod path;
mod reconstruct;

use std::fmt;
use std::str::FromStr;

use log::{debug, error};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::MetroNetwork;
use dijkstra::{WeightField, shortest_path};

pub use path::{Direction, Path, Stop, TripSummary, count_line_changes};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Unknown station: {0}")]
    InvalidEndpoint(String),
    #[error("No path from {from} to {to}")]
    NoPathExists { from: String, to: String },
    #[error("Network inconsistency during path reconstruction: {0}")]
    InternalInconsistency(String),
}

/// Optimization objective of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    LeastStops,
    LeastCost,
    LeastTime,
}

impl Criterion {
    pub const ALL: [Criterion; 3] = [
        Criterion::LeastStops,
        Criterion::LeastCost,
        Criterion::LeastTime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Criterion::LeastStops => "least_stops",
            Criterion::LeastCost => "least_cost",
            Criterion::LeastTime => "least_time",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "least_stops" | "stops" => Ok(Criterion::LeastStops),
            "least_cost" | "cost" => Ok(Criterion::LeastCost),
            "least_time" | "time" => Ok(Criterion::LeastTime),
            other => Err(format!(
                "unknown criterion '{other}', expected one of: least_stops, least_cost, least_time"
            )),
        }
    }
}

/// Route query that reports why no path was produced.
///
/// # Errors
///
/// - [`RouteError::InvalidEndpoint`] if either station is not in the network
/// - [`RouteError::NoPathExists`] if the stations are not connected
/// - [`RouteError::InternalInconsistency`] if the path cannot be rebuilt
///   from the search result
pub fn try_find_route(
    network: &MetroNetwork,
    start: &str,
    end: &str,
    criterion: Criterion,
) -> Result<Path, RouteError> {
    for station in [start, end] {
        if !network.has_station(station) {
            return Err(RouteError::InvalidEndpoint(station.to_string()));
        }
    }

    if start == end {
        return Ok(Path::single(start));
    }

    match criterion {
        Criterion::LeastStops => bfs::least_stops(network, start, end),
        Criterion::LeastCost => shortest_path(network, start, end, WeightField::Cost),
        Criterion::LeastTime => shortest_path(network, start, end, WeightField::Time),
    }
}

/// Route query under `criterion`; an empty path means no route
pub fn find_route(network: &MetroNetwork, start: &str, end: &str, criterion: Criterion) -> Path {
    match try_find_route(network, start, end, criterion) {
        Ok(path) => {
            debug!(
                "{criterion} route {start} -> {end}: {} stops",
                path.len()
            );
            path
        }
        Err(e @ RouteError::InternalInconsistency(_)) => {
            error!("{criterion} route {start} -> {end} failed: {e}");
            Path::default()
        }
        Err(e) => {
            debug!("{criterion} route {start} -> {end}: {e}");
            Path::default()
        }
    }
}

/// Path with the fewest hops
pub fn find_least_stops(network: &MetroNetwork, start: &str, end: &str) -> Path {
    find_route(network, start, end, Criterion::LeastStops)
}

/// Path with the lowest cumulative travel time
pub fn find_path_by_time(network: &MetroNetwork, start: &str, end: &str) -> Path {
    find_route(network, start, end, Criterion::LeastTime)
}

/// Path with the lowest cumulative cost
pub fn find_path_by_cost(network: &MetroNetwork, start: &str, end: &str) -> Path {
    find_route(network, start, end, Criterion::LeastCost)
}

/// Runs independent queries from `start` to every station in `ends` in
/// parallel. Results are in the order of `ends`.
pub fn find_routes_one_to_many<S>(
    network: &MetroNetwork,
    start: &str,
    ends: &[S],
    criterion: Criterion,
) -> Vec<Path>
where
    S: AsRef<str> + Sync,
{
    ends.par_iter()
        .map(|end| find_route(network, start, end.as_ref(), criterion))
        .collect()
}
