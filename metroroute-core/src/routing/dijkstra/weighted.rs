use std::collections::BinaryHeap;

use hashbrown::{HashMap, hash_map::Entry};

use super::state::State;
use crate::{
    MetroNetwork, Weight,
    model::Edge,
    routing::{
        Path, RouteError,
        reconstruct::{Parents, reconstruct_path},
    },
};

/// Edge field summed by the weighted search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WeightField {
    Time,
    Cost,
}

impl WeightField {
    fn of(self, edge: &Edge) -> Weight {
        match self {
            WeightField::Time => Weight::from(edge.time),
            WeightField::Cost => Weight::from(edge.cost),
        }
    }
}

/// Dijkstra's algorithm between two stations of the metro network.
///
/// Stations without an entry in `accumulated` are at infinite weight.
/// Stale heap entries are skipped on pop, and the search stops as soon as
/// the destination is popped.
pub(crate) fn shortest_path<'a>(
    network: &'a MetroNetwork,
    start: &'a str,
    end: &str,
    field: WeightField,
) -> Result<Path, RouteError> {
    let estimated_stations = network.station_count();
    let mut accumulated: HashMap<&'a str, Weight> = HashMap::with_capacity(estimated_stations);
    let mut parents: Parents<'a> = HashMap::with_capacity(estimated_stations);
    let mut heap = BinaryHeap::with_capacity(estimated_stations);
    let mut sequence: u64 = 0;

    // Start station has weight 0
    accumulated.insert(start, 0);
    heap.push(State {
        weight: 0,
        sequence,
        station: start,
    });
    let mut found = false;

    while let Some(State {
        weight, station, ..
    }) = heap.pop()
    {
        // Skip if we've found a better path
        if let Some(&best) = accumulated.get(station) {
            if weight > best {
                continue;
            }
        }

        if station == end {
            found = true;
            break;
        }

        for edge in network.edges_from(station) {
            let next = edge.to.as_str();
            let next_weight = weight + field.of(edge);

            match accumulated.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(next_weight);
                }
                Entry::Occupied(mut entry) => {
                    if next_weight >= *entry.get() {
                        continue;
                    }
                    *entry.get_mut() = next_weight;
                }
            }

            parents.insert(next, (station, edge));
            sequence += 1;
            heap.push(State {
                weight: next_weight,
                sequence,
                station: next,
            });
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
