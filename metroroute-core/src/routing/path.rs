//! Query results: annotated stops, trip summary and directions

use std::fmt;

use serde::Serialize;

use crate::{Cost, Time, Weight, model::Edge};

/// One station on a computed path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stop {
    pub station: String,
    /// Line of the edge that led into this stop, empty for the first stop
    pub line: String,
    /// Time of the incoming edge
    pub time: Time,
    /// Cost of the incoming edge
    pub cost: Cost,
    pub is_first: bool,
}

impl Stop {
    /// The source station of a path
    pub fn origin(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            line: String::new(),
            time: 0,
            cost: 0,
            is_first: true,
        }
    }

    /// A stop reached over `line`
    pub fn new(station: impl Into<String>, line: impl Into<String>, time: Time, cost: Cost) -> Self {
        Self {
            station: station.into(),
            line: line.into(),
            time,
            cost,
            is_first: false,
        }
    }

    /// The stop at the target of `edge`
    pub fn via(edge: &Edge) -> Self {
        Self::new(edge.to.clone(), edge.line.clone(), edge.time, edge.cost)
    }
}

/// Ordered stops from source to destination.
///
/// An empty path means no route: either an endpoint is unknown or the
/// endpoints are not connected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Path {
    stops: Vec<Stop>,
}

impl Path {
    pub fn new(stops: Vec<Stop>) -> Self {
        Self { stops }
    }

    /// Path of a query whose source and destination coincide
    pub(crate) fn single(station: &str) -> Self {
        Self::new(vec![Stop::origin(station)])
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn into_stops(self) -> Vec<Stop> {
        self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn station_names(&self) -> Vec<&str> {
        self.stops.iter().map(|stop| stop.station.as_str()).collect()
    }

    pub fn summary(&self) -> TripSummary {
        TripSummary::from_stops(&self.stops)
    }

    /// Step-by-step directions for this path
    pub fn directions(&self) -> Vec<Direction> {
        let mut directions = Vec::with_capacity(self.stops.len() + 2);
        let mut active_line = "";

        for (idx, stop) in self.stops.iter().enumerate() {
            if stop.is_first {
                directions.push(Direction::Start {
                    station: stop.station.clone(),
                });
                if let Some(next) = self.stops.get(idx + 1) {
                    active_line = next.line.as_str();
                    if !active_line.is_empty() {
                        directions.push(Direction::Board {
                            line: next.line.clone(),
                        });
                    }
                }
                continue;
            }

            if !stop.line.is_empty() && !active_line.is_empty() && stop.line != active_line {
                directions.push(Direction::Change {
                    line: stop.line.clone(),
                });
            }
            active_line = stop.line.as_str();

            directions.push(Direction::Arrive {
                station: stop.station.clone(),
                line: stop.line.clone(),
                time: stop.time,
                cost: stop.cost,
            });
        }

        directions
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Stop;
    type IntoIter = std::slice::Iter<'a, Stop>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.iter()
    }
}

/// Derived trip statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TripSummary {
    pub stations: usize,
    pub hops: usize,
    pub total_time: Weight,
    pub total_cost: Weight,
    pub line_changes: usize,
}

impl TripSummary {
    pub fn from_stops(stops: &[Stop]) -> Self {
        let (total_time, total_cost) = stops.iter().skip(1).fold((0, 0), |(time, cost), stop| {
            (time + Weight::from(stop.time), cost + Weight::from(stop.cost))
        });

        Self {
            stations: stops.len(),
            hops: stops.len().saturating_sub(1),
            total_time,
            total_cost,
            line_changes: count_line_changes(stops),
        }
    }
}

/// Number of transitions between two consecutive, non-empty, different
/// line names. Boarding the first line is not a change.
pub fn count_line_changes(stops: &[Stop]) -> usize {
    let mut previous = "";
    let mut changes = 0;

    for stop in stops.iter().skip(1) {
        let line = stop.line.as_str();
        if !line.is_empty() && !previous.is_empty() && line != previous {
            changes += 1;
        }
        previous = line;
    }

    changes
}

/// A single instruction of the rendered route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Direction {
    Start {
        station: String,
    },
    Board {
        line: String,
    },
    Change {
        line: String,
    },
    Arrive {
        station: String,
        line: String,
        time: Time,
        cost: Cost,
    },
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Start { station } => write!(f, "Start at {station}."),
            Direction::Board { line } => write!(f, "Board {line}."),
            Direction::Change { line } => write!(f, "Change to {line}."),
            Direction::Arrive {
                station,
                line,
                time,
                cost,
            } => {
                write!(f, "Arrive at {station} ")?;
                if !line.is_empty() {
                    write!(f, "via {line} ")?;
                }
                write!(f, "(segment: {time} min, cost {cost}).")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_with_lines(lines: &[&str]) -> Path {
        let mut stops = vec![Stop::origin("S0")];
        for (idx, line) in lines.iter().enumerate() {
            stops.push(Stop::new(format!("S{}", idx + 1), *line, 2, 10));
        }
        Path::new(stops)
    }

    #[test]
    fn one_change_when_line_switches_once() {
        let path = path_with_lines(&["Red", "Red", "Blue"]);
        assert_eq!(count_line_changes(path.stops()), 1);
    }

    #[test]
    fn two_changes_when_switching_back() {
        let path = path_with_lines(&["Red", "Blue", "Red"]);
        assert_eq!(count_line_changes(path.stops()), 2);
    }

    #[test]
    fn boarding_is_not_a_change() {
        let path = path_with_lines(&["Red"]);
        assert_eq!(count_line_changes(path.stops()), 0);
        assert_eq!(count_line_changes(&[]), 0);
    }

    #[test]
    fn summary_skips_the_origin() {
        let mut stops = path_with_lines(&["Red", "Blue"]).into_stops();
        // origin annotations never count
        stops[0].time = 99;
        stops[0].cost = 99;

        let summary = TripSummary::from_stops(&stops);
        assert_eq!(
            summary,
            TripSummary {
                stations: 3,
                hops: 2,
                total_time: 4,
                total_cost: 20,
                line_changes: 1,
            }
        );
    }

    #[test]
    fn empty_path_has_empty_summary() {
        assert_eq!(Path::default().summary(), TripSummary::default());
        assert!(Path::default().directions().is_empty());
    }

    #[test]
    fn directions_mark_board_and_changes() {
        let path = path_with_lines(&["Red", "Red", "Blue"]);
        let rendered: Vec<String> = path.directions().iter().map(ToString::to_string).collect();

        assert_eq!(
            rendered,
            vec![
                "Start at S0.",
                "Board Red.",
                "Arrive at S1 via Red (segment: 2 min, cost 10).",
                "Arrive at S2 via Red (segment: 2 min, cost 10).",
                "Change to Blue.",
                "Arrive at S3 via Blue (segment: 2 min, cost 10).",
            ]
        );
    }

    #[test]
    fn single_stop_directions() {
        let path = Path::single("Rajiv Chowk");
        assert_eq!(
            path.directions(),
            vec![Direction::Start {
                station: "Rajiv Chowk".to_string()
            }]
        );
        assert_eq!(path.summary().hops, 0);
    }
}
