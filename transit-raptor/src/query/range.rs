//! Full-day profile query.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{Journey, StopId, Time};
use crate::raptor::RaptorIndex;
use crate::results::{JourneyFilter, MultipleCriteriaFilter, get_results};

/// Plans every non-dominated journey between two stops across a day.
///
/// Scans first from the start of the range, then again from one second
/// after the earliest departure each scan found, until a scan finds nothing
/// or the range ends.
pub struct RangeQuery<'a> {
    index: &'a RaptorIndex,
    filters: Vec<Box<dyn JourneyFilter + 'a>>,
}

impl<'a> RangeQuery<'a> {
    /// Create a query that removes dominated journeys.
    pub fn new(index: &'a RaptorIndex) -> Self {
        Self {
            index,
            filters: vec![Box::new(MultipleCriteriaFilter::default())],
        }
    }

    /// Replace the filters applied to the collected journeys.
    pub fn with_filters(mut self, filters: Vec<Box<dyn JourneyFilter + 'a>>) -> Self {
        self.filters = filters;
        self
    }

    /// Journeys between `origin` and `destination` over the configured range.
    pub fn plan(&self, origin: &StopId, destination: &StopId, date: NaiveDate) -> Vec<Journey> {
        let config = self.index.config();
        self.plan_between(
            origin,
            destination,
            date,
            config.range_start_time,
            config.range_end_time,
        )
    }

    /// Journeys departing from `start` onwards, scanning while the next
    /// departure time is before `end`.
    pub fn plan_between(
        &self,
        origin: &StopId,
        destination: &StopId,
        date: NaiveDate,
        start: Time,
        end: Time,
    ) -> Vec<Journey> {
        let mut results = Vec::new();
        let mut time = start;

        while time < end {
            let origins = BTreeMap::from([(origin.clone(), time)]);
            let scan = self.index.scan(&origins, date);
            let found = get_results(&scan.connections, destination);

            let Some(earliest) = found.iter().map(Journey::departure_time).min() else {
                break;
            };

            debug!(time, found = found.len(), earliest, "range query batch");
            results.extend(found);
            time = earliest.saturating_add(1).max(time + 1);
        }

        self.filters
            .iter()
            .fold(results, |journeys, filter| filter.apply(journeys))
    }
}
