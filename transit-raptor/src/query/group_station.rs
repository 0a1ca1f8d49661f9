//! Multi-origin, multi-destination query spanning several service days.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::domain::{Journey, ONE_DAY, ServiceDay, StopId, Time};
use crate::raptor::{ConnectionIndex, RaptorIndex, ScanResult};
use crate::results::{JourneyFilter, get_results};

/// Plans journeys between groups of stops, moving on to the next day when
/// nothing is found.
///
/// Each day that fails to reach a destination hands every stop it reached
/// to the next day as an origin. Once a destination is reached, journeys
/// are stitched back through the earlier days.
pub struct GroupStationDepartAfterQuery<'a> {
    index: &'a RaptorIndex,
    filters: Vec<Box<dyn JourneyFilter + 'a>>,
}

impl<'a> GroupStationDepartAfterQuery<'a> {
    /// Create a query with no filters.
    pub fn new(index: &'a RaptorIndex) -> Self {
        Self {
            index,
            filters: Vec::new(),
        }
    }

    /// Filters applied, in order, to the journeys found.
    pub fn with_filters(mut self, filters: Vec<Box<dyn JourneyFilter + 'a>>) -> Self {
        self.filters = filters;
        self
    }

    /// Journeys from any of `origins` to any of `destinations`, leaving at
    /// or after `time` on `date`.
    ///
    /// Searches at most `max_search_days` days and returns nothing if no
    /// destination is reached in that time.
    pub fn plan(
        &self,
        origins: &[StopId],
        destinations: &[StopId],
        date: NaiveDate,
        time: Time,
    ) -> Vec<Journey> {
        let origins: BTreeMap<StopId, Time> = origins.iter().map(|o| (o.clone(), time)).collect();
        self.plan_from(&origins, destinations, date)
    }

    /// Journeys to any of `destinations`, leaving each origin no earlier
    /// than its own departure time on `date`.
    pub fn plan_from(
        &self,
        origins: &BTreeMap<StopId, Time>,
        destinations: &[StopId],
        date: NaiveDate,
    ) -> Vec<Journey> {
        let journeys = self.get_journeys(origins.clone(), destinations, date);

        self.filters
            .iter()
            .fold(journeys, |journeys, filter| filter.apply(journeys))
    }

    fn get_journeys(
        &self,
        mut origins: BTreeMap<StopId, Time>,
        destinations: &[StopId],
        date: NaiveDate,
    ) -> Vec<Journey> {
        let mut previous_days: Vec<ConnectionIndex> = Vec::new();
        let mut day = ServiceDay::new(date);

        for day_number in 0..self.index.config().max_search_days {
            let mut scanner = self.index.route_scanner();
            let result = self.index.scan_with(&mut scanner, &origins, day);
            let journeys = complete_journeys(&result.connections, &previous_days, destinations);

            if !journeys.is_empty() {
                debug!(day = day_number, found = journeys.len(), "group station query");
                return journeys;
            }

            origins = carry_forward(&result);
            debug!(
                day = day_number,
                carried = origins.len(),
                "no destination reached, searching next day"
            );

            if origins.is_empty() {
                break;
            }

            previous_days.push(result.connections);
            day = match day.next() {
                Some(next) => next,
                None => break,
            };
        }

        Vec::new()
    }
}

/// Origins for the next day: every reached stop, departing at its arrival
/// time less a day, and no earlier than 1.
fn carry_forward(result: &ScanResult) -> BTreeMap<StopId, Time> {
    result
        .connections
        .stops()
        .filter_map(|stop| {
            let arrival = result.arrivals.get(stop)?;
            Some((stop.clone(), arrival.saturating_sub(ONE_DAY).max(1)))
        })
        .collect()
}

/// Journeys reaching a destination today, each prefixed with journeys from
/// the previous days, most recent day first.
fn complete_journeys(
    today: &ConnectionIndex,
    previous_days: &[ConnectionIndex],
    destinations: &[StopId],
) -> Vec<Journey> {
    let reached: Vec<Journey> = destinations
        .iter()
        .flat_map(|destination| get_results(today, destination))
        .collect();

    previous_days.iter().rev().fold(reached, |journeys, connections| {
        journeys
            .into_iter()
            .flat_map(|later| {
                get_results(connections, later.origin())
                    .into_iter()
                    .filter(|earlier| reaches_in_time(earlier, &later))
                    .filter_map(|earlier| match earlier.join_next_day(later.clone()) {
                        Ok(joined) => Some(joined),
                        Err(err) => {
                            warn!(error = %err, "could not join journeys across days");
                            None
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    })
}

/// True if `earlier` arrives before `later`, which runs on the following
/// day, leaves. Walks are not timetabled so any arrival suits them.
fn reaches_in_time(earlier: &Journey, later: &Journey) -> bool {
    later.ride_count() == 0 || earlier.arrival_time() <= later.departure_time() + ONE_DAY
}
