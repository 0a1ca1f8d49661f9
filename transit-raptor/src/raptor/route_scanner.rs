//! Route scanner: finds the earliest catchable trip on a route.
//!
//! Each boarding position of a route keeps a cursor into the route's
//! (departure ordered) trips. Calls scan backwards from the cursor and stop
//! at the first trip that leaves too early, so a sequence of calls with
//! non-increasing times costs roughly one pass over the route's trips in
//! total.

use std::collections::HashMap;

use crate::domain::{ServiceDay, Time};

use super::index::{CalendarFilter, Route, RouteIdx};

/// Per-scan trip lookup with an amortized cursor per route and position.
///
/// Successive calls for the same route and board position must use
/// non-increasing times; debug builds assert this. Use a fresh scanner for
/// each independent scan.
#[derive(Debug)]
pub struct RouteScanner<'a> {
    routes: &'a [Route],
    filter: CalendarFilter,
    cursors: HashMap<(RouteIdx, usize), usize>,
    #[cfg(debug_assertions)]
    last_times: HashMap<(RouteIdx, usize), Time>,
}

impl<'a> RouteScanner<'a> {
    pub(crate) fn new(routes: &'a [Route], filter: CalendarFilter) -> Self {
        Self {
            routes,
            filter,
            cursors: HashMap::new(),
            #[cfg(debug_assertions)]
            last_times: HashMap::new(),
        }
    }

    /// Index (within the route) of the earliest trip running on `day` that
    /// departs `position` at or after `earliest`.
    pub(crate) fn get_trip(
        &mut self,
        route: RouteIdx,
        day: ServiceDay,
        position: usize,
        earliest: Time,
    ) -> Option<usize> {
        #[cfg(debug_assertions)]
        {
            let previous = self.last_times.insert((route, position), earliest);
            debug_assert!(
                previous.is_none_or(|p| earliest <= p),
                "route scanner called with increasing time for route {route} position {position}"
            );
        }

        let trips = &self.routes[route].trips;
        let start = match self.cursors.get(&(route, position)) {
            Some(&cursor) => cursor,
            None => trips.len().checked_sub(1)?,
        };

        let mut found = None;
        for i in (0..=start).rev() {
            let trip = &trips[i];

            if trip.departure(position) < earliest {
                break;
            }

            if self.filter == CalendarFilter::Prefiltered || trip.calendar.runs_on_day(day) {
                found = Some(i);
            }

            // Skipped trips may still be needed until a running one is found
            if found.is_none() || found == Some(i) {
                self.cursors.insert((route, position), i);
            }
        }

        found
    }
}
