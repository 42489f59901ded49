use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};

use super::{
    Path, RouteError,
    reconstruct::{Parents, reconstruct_path},
};
use crate::MetroNetwork;

/// Breadth-first search for the path with the fewest hops.
///
/// Neighbours are expanded in the order their edges were stored, so among
/// equally short paths the one discovered first wins.
pub(crate) fn least_stops<'a>(
    network: &'a MetroNetwork,
    start: &'a str,
    end: &str,
) -> Result<Path, RouteError> {
    let mut parents: Parents<'a> = HashMap::new();
    let mut visited: HashSet<&'a str> = HashSet::new();
    let mut queue = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);
    let mut found = false;

    while let Some(current) = queue.pop_front() {
        if current == end {
            found = true;
            break;
        }

        for edge in network.edges_from(current) {
            let next = edge.to.as_str();
            if visited.insert(next) {
                parents.insert(next, (current, edge));
                queue.push_back(next);
            }
        }
    }

    if !found {
        return Err(RouteError::NoPathExists {
            from: start.to_string(),
            to: end.to_string(),
        });
    }

    reconstruct_path(network, &parents, start, end)
}
