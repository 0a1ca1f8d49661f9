//! Transfer patterns as sets of via stop strings.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::domain::StopId;
use crate::raptor::ConnectionIndex;
use crate::results::all_paths;

use super::TransferPatternResults;

/// Unordered stop pair, stored with the smaller id first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JourneyKey {
    first: StopId,
    second: StopId,
}

impl JourneyKey {
    /// Key for a journey between `a` and `b` in either direction.
    pub fn new(a: StopId, b: StopId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Returns the smaller stop id.
    pub fn first(&self) -> &StopId {
        &self.first
    }

    /// Returns the larger stop id.
    pub fn second(&self) -> &StopId {
        &self.second
    }
}

/// The two ids joined by a comma, e.g. "A,C". Stop ids never contain a
/// comma, so distinct pairs always give distinct keys.
impl fmt::Display for JourneyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.first, self.second)
    }
}

/// Comma separated via stops for each stop pair.
///
/// Via stops are listed travelling from the key's first stop to its second.
/// Direct journeys are not recorded, so no set contains an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferPatternIndex {
    patterns: BTreeMap<JourneyKey, BTreeSet<String>>,
}

impl TransferPatternIndex {
    /// Patterns recorded between `a` and `b`, in either direction.
    pub fn get(&self, a: &StopId, b: &StopId) -> Option<&BTreeSet<String>> {
        self.patterns.get(&JourneyKey::new(a.clone(), b.clone()))
    }

    /// Every key with its patterns, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&JourneyKey, &BTreeSet<String>)> {
        self.patterns.iter()
    }

    /// One `(key, pattern)` row per pattern, in key order.
    ///
    /// Rows are unique, so a store can insert them with insert-if-absent
    /// semantics.
    pub fn rows(&self) -> impl Iterator<Item = (String, &str)> {
        self.patterns.iter().flat_map(|(key, patterns)| {
            let key = key.to_string();
            patterns.iter().map(move |p| (key.clone(), p.as_str()))
        })
    }

    /// Returns the number of stop pairs.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn insert(&mut self, origin: &StopId, destination: &StopId, mut via: Vec<&str>) {
        if origin > destination {
            via.reverse();
        }

        self.patterns
            .entry(JourneyKey::new(origin.clone(), destination.clone()))
            .or_default()
            .insert(via.join(","));
    }
}

/// Builds a [`TransferPatternIndex`] from every path of every scan.
#[derive(Debug, Clone, Default)]
pub struct StringResults {
    index: TransferPatternIndex,
}

impl StringResults {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransferPatternResults for StringResults {
    type Output = TransferPatternIndex;

    fn add(&mut self, connections: &ConnectionIndex) {
        for path in all_paths(connections) {
            // Destination first, origin last
            let [destination, via @ .., origin] = path.as_slice() else {
                continue;
            };
            if via.is_empty() {
                continue;
            }

            let via = via.iter().rev().map(StopId::as_str).collect();
            self.index.insert(origin, destination, via);
        }
    }

    fn finalize(self) -> TransferPatternIndex {
        self.index
    }
}
