//! Queue builder: which routes to scan in a round, and from where.

use std::collections::BTreeMap;

use super::index::{RaptorIndex, RouteIdx, StopIdx};

impl RaptorIndex {
    /// Routes boarding at any marked stop, each mapped to the earliest
    /// position on the route among its marked stops.
    ///
    /// Each route appears once, so a round scans every route at most once.
    pub(crate) fn queue(&self, marked: &[StopIdx]) -> BTreeMap<RouteIdx, usize> {
        let mut queue: BTreeMap<RouteIdx, usize> = BTreeMap::new();

        for &stop in marked {
            for &route in &self.routes_at_stop[stop] {
                let Some(position) = self.routes[route].position(stop) else {
                    continue;
                };

                queue
                    .entry(route)
                    .and_modify(|p| *p = (*p).min(position))
                    .or_insert(position);
            }
        }

        queue
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use crate::domain::{Calendar, ServiceId, StopId, StopTime, Trip, TripId, WeekdayFlags};
    use crate::raptor::{RaptorIndex, Timetable};

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn trip(id: &str, stops: &[&str]) -> Trip {
        let stop_times = stops
            .iter()
            .enumerate()
            .map(|(i, s)| StopTime::new(stop(s), 1000 + i as u32 * 10, 1000 + i as u32 * 10))
            .collect();
        Trip::new(TripId::new(id), ServiceId::new("S1"), stop_times)
    }

    fn index() -> RaptorIndex {
        let mut calendars = HashMap::new();
        calendars.insert(
            ServiceId::new("S1"),
            Calendar::new(
                NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2018, 12, 31).unwrap(),
                WeekdayFlags::all(),
            ),
        );
        RaptorIndex::builder(Timetable {
            trips: vec![trip("R1", &["A", "B", "C", "D"]), trip("R2", &["E", "C", "F"])],
            calendars,
            ..Timetable::default()
        })
        .build()
        .unwrap()
    }

    fn marked(index: &RaptorIndex, stops: &[&str]) -> Vec<usize> {
        stops
            .iter()
            .map(|s| index.stops.index(&stop(s)).unwrap())
            .collect()
    }

    #[test]
    fn routes_at_marked_stops_queued() {
        let index = index();
        let queue = index.queue(&marked(&index, &["B"]));

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.get(&0), Some(&1));
    }

    #[test]
    fn earliest_position_wins() {
        let index = index();
        let queue = index.queue(&marked(&index, &["C", "B"]));

        assert_eq!(queue.get(&0), Some(&1));
        assert_eq!(queue.get(&1), Some(&1));
    }

    #[test]
    fn no_routes_for_unmarked() {
        let index = index();
        assert!(index.queue(&[]).is_empty());
    }
}
