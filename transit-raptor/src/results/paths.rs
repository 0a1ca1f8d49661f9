//! Path extraction: the stops a journey changes at, without timings.

use crate::domain::StopId;
use crate::raptor::ConnectionIndex;

/// Stops of a journey from its destination back to its origin.
///
/// Contains the destination, then the origin of every leg in reverse travel
/// order, so the last element is where the journey started.
pub type Path = Vec<StopId>;

/// The path reaching `destination` in `round`, if it was reached then.
pub fn get_path(connections: &ConnectionIndex, destination: &StopId, round: usize) -> Option<Path> {
    let mut path = Vec::with_capacity(round + 1);
    let mut stop = destination.clone();
    path.push(stop.clone());

    for k in (1..=round).rev() {
        stop = connections.get(&stop, k)?.origin().clone();
        path.push(stop.clone());
    }

    Some(path)
}

/// Paths for every stop and round in the index.
pub fn all_paths(connections: &ConnectionIndex) -> impl Iterator<Item = Path> + '_ {
    connections.stops().flat_map(move |destination| {
        connections
            .rounds(destination)
            .filter_map(move |(round, _)| get_path(connections, destination, round))
    })
}
