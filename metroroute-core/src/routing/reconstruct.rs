use hashbrown::HashMap;

use super::{Path, RouteError, Stop};
use crate::{MetroNetwork, model::Edge};

/// Predecessor of each reached station and the edge the search relaxed
/// to get there
pub(crate) type Parents<'a> = HashMap<&'a str, (&'a str, &'a Edge)>;

/// Walk parent pointers back from `end`, annotating each stop from the
/// recorded edge, and return the stops in source-to-destination order.
pub(crate) fn reconstruct_path(
    network: &MetroNetwork,
    parents: &Parents<'_>,
    start: &str,
    end: &str,
) -> Result<Path, RouteError> {
    let mut stops = Vec::new();
    let mut current = end;

    while current != start {
        // A consistent parent chain never revisits a station
        if stops.len() > parents.len() {
            return Err(RouteError::InternalInconsistency(format!(
                "parent chain from '{end}' does not reach '{start}'"
            )));
        }

        let Some(&(previous, edge)) = parents.get(current) else {
            return Err(RouteError::InternalInconsistency(format!(
                "no parent recorded for '{current}'"
            )));
        };
        if edge.to != current || network.find_edge(previous, current).is_none() {
            return Err(RouteError::InternalInconsistency(format!(
                "edge not found from '{previous}' to '{current}'"
            )));
        }

        stops.push(Stop::via(edge));
        current = previous;
    }

    stops.push(Stop::origin(start));
    stops.reverse();
    Ok(Path::new(stops))
}
