//! Transfer pattern compressors.
//!
//! A transfer pattern query feeds the connection index of every scan it runs
//! into a [`TransferPatternResults`], which keeps only the sequences of stops
//! changed at, dropping timings. Two strategies are provided:
//!
//! - [`GraphResults`] merges paths into a DAG that shares common suffixes.
//! - [`StringResults`] stores comma separated via stops per stop pair, ready
//!   to be written to a table.

mod graph;
mod string_set;

pub use graph::{GraphResults, NodeId, TransferPatternGraph, TreeNode};
pub use string_set::{JourneyKey, StringResults, TransferPatternIndex};

use crate::raptor::ConnectionIndex;

/// Accumulates the paths of many scans into one aggregate.
pub trait TransferPatternResults {
    /// The aggregate produced once every scan has been added.
    type Output;

    /// Add every path in a scan's connection index.
    fn add(&mut self, connections: &ConnectionIndex);

    /// Consume the accumulator and return the aggregate.
    fn finalize(self) -> Self::Output;
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::BTreeMap;

    use crate::domain::{StopId, Transfer};
    use crate::raptor::{Connection, ConnectionIndex};

    /// Connections for a single journey visiting `stops` in order, one leg
    /// per round.
    pub(crate) fn path_connections(stops: &[&str]) -> ConnectionIndex {
        let stop = |s: &str| StopId::parse(s).unwrap();
        let mut connections = BTreeMap::new();

        for (round, pair) in stops.windows(2).enumerate() {
            let transfer = Transfer::new(stop(pair[0]), stop(pair[1]), 0);
            connections
                .entry(stop(pair[1]))
                .or_insert_with(BTreeMap::new)
                .insert(round + 1, Connection::Transfer(transfer));
        }

        ConnectionIndex::new(connections)
    }
}
