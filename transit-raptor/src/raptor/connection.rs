//! Scan output: the best connection per stop and round.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::sync::Arc;

use crate::domain::{StopId, Time, Transfer, Trip};

/// How a stop was reached in a given round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connection {
    /// Ride on `trip` from stop time `board` to stop time `alight`
    Timetable {
        trip: Arc<Trip>,
        board: usize,
        alight: usize,
    },
    /// Transfer from another stop
    Transfer(Transfer),
}

impl Connection {
    /// The stop this connection starts from.
    pub fn origin(&self) -> &StopId {
        match self {
            Connection::Timetable { trip, board, .. } => &trip.stop_times[*board].stop,
            Connection::Transfer(transfer) => &transfer.origin,
        }
    }
}

/// Best connection to each stop, indexed by round.
///
/// Following the connection at `(stop, k)` back to its origin always finds a
/// connection at `(origin, k - 1)`, until round 0 where the origin is one of
/// the scan's starting stops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionIndex {
    connections: BTreeMap<StopId, BTreeMap<usize, Connection>>,
}

impl ConnectionIndex {
    pub(crate) fn new(connections: BTreeMap<StopId, BTreeMap<usize, Connection>>) -> Self {
        Self { connections }
    }

    /// Connection reaching `stop` in round `round`, if any.
    pub fn get(&self, stop: &StopId, round: usize) -> Option<&Connection> {
        self.connections.get(stop)?.get(&round)
    }

    /// Every round in which `stop` was reached, in ascending order.
    pub fn rounds(&self, stop: &StopId) -> impl Iterator<Item = (usize, &Connection)> {
        self.connections
            .get(stop)
            .into_iter()
            .flat_map(|rounds| rounds.iter().map(|(k, c)| (*k, c)))
    }

    /// Returns true if `stop` was reached in any round.
    pub fn is_reached(&self, stop: &StopId) -> bool {
        self.connections.contains_key(stop)
    }

    /// Stops reached in at least one round, in id order.
    pub fn stops(&self) -> btree_map::Keys<'_, StopId, BTreeMap<usize, Connection>> {
        self.connections.keys()
    }

    /// Returns the number of reached stops.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Returns true if no stop was reached.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

/// Best known arrival time at each reached stop, origins included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BestArrivals {
    arrivals: BTreeMap<StopId, Time>,
}

impl BestArrivals {
    pub(crate) fn new(arrivals: BTreeMap<StopId, Time>) -> Self {
        Self { arrivals }
    }

    /// Best arrival at `stop`, or `None` if it was never reached.
    pub fn get(&self, stop: &StopId) -> Option<Time> {
        self.arrivals.get(stop).copied()
    }

    /// All reached stops with their arrival times.
    pub fn iter(&self) -> impl Iterator<Item = (&StopId, Time)> {
        self.arrivals.iter().map(|(s, t)| (s, *t))
    }
}

/// Everything a scan produces.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Best connection per stop and round
    pub connections: ConnectionIndex,
    /// Best arrival per stop
    pub arrivals: BestArrivals,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ServiceId, StopTime, TripId};

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    #[test]
    fn connection_origin() {
        let trip = Arc::new(Trip::new(
            TripId::new("T1"),
            ServiceId::new("S1"),
            vec![
                StopTime::departure(stop("A"), 1000),
                StopTime::new(stop("B"), 1030, 1035),
                StopTime::arrival(stop("C"), 1100),
            ],
        ));

        let ride = Connection::Timetable {
            trip,
            board: 1,
            alight: 2,
        };
        assert_eq!(ride.origin(), &stop("B"));

        let walk = Connection::Transfer(Transfer::new(stop("C"), stop("D"), 60));
        assert_eq!(walk.origin(), &stop("C"));
    }

    #[test]
    fn index_lookup() {
        let walk = Connection::Transfer(Transfer::new(stop("A"), stop("B"), 60));
        let mut rounds = BTreeMap::new();
        rounds.insert(3, walk.clone());
        rounds.insert(1, walk.clone());
        let mut connections = BTreeMap::new();
        connections.insert(stop("B"), rounds);
        let index = ConnectionIndex::new(connections);

        assert_eq!(index.get(&stop("B"), 1), Some(&walk));
        assert_eq!(index.get(&stop("B"), 2), None);
        assert_eq!(index.get(&stop("A"), 1), None);
        assert_eq!(
            index.rounds(&stop("B")).map(|(k, _)| k).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(index.rounds(&stop("A")).count(), 0);
        assert!(index.is_reached(&stop("B")));
        assert!(!index.is_reached(&stop("A")));
        assert_eq!(index.len(), 1);
    }
}
