//! The round-based scan.
//!
//! Round k finds the best arrival at every stop using exactly k legs, where
//! each ride on a trip and each transfer is one leg. A round only expands the
//! stops improved in the round before it, and the scan ends when a round
//! improves nothing.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::{debug, trace, warn};

use crate::domain::{ServiceDay, StopId, Time};

use super::connection::{BestArrivals, Connection, ConnectionIndex, ScanResult};
use super::index::{RaptorIndex, StopIdx};
use super::route_scanner::RouteScanner;

const UNREACHED: Time = Time::MAX;

/// Mutable state of one scan.
struct ScanState {
    best: Vec<Time>,
    previous: Vec<Time>,
    current: Vec<Time>,
    connections: Vec<BTreeMap<usize, Connection>>,
    improved: BTreeSet<StopIdx>,
}

impl ScanState {
    fn new(stops: usize) -> Self {
        Self {
            best: vec![UNREACHED; stops],
            previous: vec![UNREACHED; stops],
            current: vec![UNREACHED; stops],
            connections: vec![BTreeMap::new(); stops],
            improved: BTreeSet::new(),
        }
    }

    fn improve(&mut self, stop: StopIdx, round: usize, arrival: Time, connection: Connection) {
        self.best[stop] = arrival;
        self.current[stop] = arrival;
        self.connections[stop].insert(round, connection);
        self.improved.insert(stop);
    }

    /// Close the round, returning the stops to expand in the next one.
    fn finish_round(&mut self) -> Vec<StopIdx> {
        std::mem::swap(&mut self.previous, &mut self.current);
        self.current.fill(UNREACHED);
        std::mem::take(&mut self.improved).into_iter().collect()
    }
}

impl RaptorIndex {
    /// A fresh route scanner for one scan over this index.
    pub fn route_scanner(&self) -> RouteScanner<'_> {
        RouteScanner::new(&self.routes, self.calendar_filter)
    }

    /// Scan from `origins`, each departing at its given time, on `date`.
    ///
    /// Origins missing from the index are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::{BTreeMap, HashMap};
    /// use chrono::NaiveDate;
    /// use transit_raptor::domain::{Calendar, ServiceId, StopId, StopTime, Trip, TripId, WeekdayFlags};
    /// use transit_raptor::raptor::{RaptorIndex, Timetable};
    ///
    /// let a = StopId::parse("A").unwrap();
    /// let b = StopId::parse("B").unwrap();
    /// let date = NaiveDate::from_ymd_opt(2018, 10, 16).unwrap();
    ///
    /// let mut calendars = HashMap::new();
    /// calendars.insert(ServiceId::new("S1"), Calendar::new(date, date, WeekdayFlags::all()));
    /// let trip = Trip::new(
    ///     TripId::new("T1"),
    ///     ServiceId::new("S1"),
    ///     vec![StopTime::departure(a.clone(), 1000), StopTime::arrival(b.clone(), 1030)],
    /// );
    /// let index = RaptorIndex::builder(Timetable { trips: vec![trip], calendars, ..Timetable::default() })
    ///     .build()
    ///     .unwrap();
    ///
    /// let result = index.scan(&BTreeMap::from([(a, 900)]), date);
    /// assert_eq!(result.arrivals.get(&b), Some(1030));
    /// assert!(result.connections.get(&b, 1).is_some());
    /// ```
    pub fn scan(&self, origins: &BTreeMap<StopId, Time>, date: NaiveDate) -> ScanResult {
        let mut scanner = self.route_scanner();
        self.scan_with(&mut scanner, origins, ServiceDay::new(date))
    }

    /// Scan using an existing route scanner.
    ///
    /// The scanner's cursors carry over from earlier scans, which is only
    /// correct if every boarding time in this scan is no later than in the
    /// previous ones.
    pub fn scan_with(
        &self,
        scanner: &mut RouteScanner<'_>,
        origins: &BTreeMap<StopId, Time>,
        day: ServiceDay,
    ) -> ScanResult {
        let mut state = ScanState::new(self.stops.len());
        let mut marked = Vec::with_capacity(origins.len());

        for (origin, &time) in origins {
            match self.stops.index(origin) {
                Some(s) => {
                    state.best[s] = time;
                    state.previous[s] = time;
                    marked.push(s);
                }
                None => debug!(%origin, "origin not in index"),
            }
        }
        marked.sort_unstable();

        let mut round = 1;
        while !marked.is_empty() {
            if round > self.config.max_rounds {
                warn!(
                    max_rounds = self.config.max_rounds,
                    marked = marked.len(),
                    "scan stopped at round limit"
                );
                break;
            }

            self.scan_routes(scanner, &mut state, &marked, round, day);
            self.scan_transfers(&mut state, &marked, round);

            marked = state.finish_round();
            trace!(round, improved = marked.len(), "finished round");
            round += 1;
        }

        self.collect(state)
    }

    fn scan_routes(
        &self,
        scanner: &mut RouteScanner<'_>,
        state: &mut ScanState,
        marked: &[StopIdx],
        round: usize,
        day: ServiceDay,
    ) {
        for (route_idx, start) in self.queue(marked) {
            let route = &self.routes[route_idx];
            // (trip index within the route, boarding position)
            let mut boarded: Option<(usize, usize)> = None;

            for pos in start..route.path.len() {
                let stop = route.path[pos];
                let interchange = self.interchange[stop];

                if let Some((trip_idx, board)) = boarded {
                    let trip = &route.trips[trip_idx].trip;
                    let arrival = trip.stop_times[pos].arrival_time.saturating_add(interchange);

                    if route.drop_off[pos] && arrival < state.best[stop] {
                        let connection = Connection::Timetable {
                            trip: trip.clone(),
                            board,
                            alight: pos,
                        };
                        state.improve(stop, round, arrival, connection);
                    }
                }

                let previous = state.previous[stop];
                if !route.pick_up[pos] || previous == UNREACHED {
                    continue;
                }

                let can_catch_earlier = match boarded {
                    None => true,
                    Some((trip_idx, _)) => {
                        let arrival = route.trips[trip_idx].trip.stop_times[pos].arrival_time;
                        previous < arrival.saturating_add(interchange)
                    }
                };

                if can_catch_earlier {
                    if let Some(found) = scanner.get_trip(route_idx, day, pos, previous) {
                        // The same trip is re-boarded here, a later one never replaces it
                        if boarded.is_none_or(|(current, _)| found <= current) {
                            boarded = Some((found, pos));
                        }
                    }
                }
            }
        }
    }

    fn scan_transfers(&self, state: &mut ScanState, marked: &[StopIdx], round: usize) {
        for &origin in marked {
            let previous = state.previous[origin];

            for (destination, transfer) in &self.transfers[origin] {
                let arrival = previous
                    .saturating_add(transfer.duration)
                    .saturating_add(self.interchange[*destination]);

                if transfer.is_valid_at(arrival) && arrival < state.best[*destination] {
                    let connection = Connection::Transfer(transfer.clone());
                    state.improve(*destination, round, arrival, connection);
                }
            }
        }
    }

    fn collect(&self, state: ScanState) -> ScanResult {
        let mut connections = BTreeMap::new();
        let mut arrivals = BTreeMap::new();

        for (stop, rounds) in state.connections.into_iter().enumerate() {
            if !rounds.is_empty() {
                connections.insert(self.stops.id(stop).clone(), rounds);
            }
        }

        for (stop, &time) in state.best.iter().enumerate() {
            if time != UNREACHED {
                arrivals.insert(self.stops.id(stop).clone(), time);
            }
        }

        ScanResult {
            connections: ConnectionIndex::new(connections),
            arrivals: BestArrivals::new(arrivals),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config::PlannerConfig;
    use crate::domain::{Calendar, ServiceId, StopTime, Transfer, Trip, TripId, WeekdayFlags};
    use crate::raptor::Timetable;

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 10, 16).unwrap()
    }

    fn trip(id: &str, stop_times: Vec<StopTime>) -> Trip {
        Trip::new(TripId::new(id), ServiceId::new("S1"), stop_times)
    }

    fn timetable(trips: Vec<Trip>, transfers: Vec<Transfer>) -> Timetable {
        let mut calendars = HashMap::new();
        calendars.insert(
            ServiceId::new("S1"),
            Calendar::new(date(), date(), WeekdayFlags::all()),
        );
        Timetable {
            trips,
            transfers,
            calendars,
            ..Timetable::default()
        }
    }

    fn origins(stop_id: &str, time: Time) -> BTreeMap<StopId, Time> {
        BTreeMap::from([(stop(stop_id), time)])
    }

    #[test]
    fn rounds_count_legs() {
        let index = RaptorIndex::builder(timetable(
            vec![
                trip("T1", vec![StopTime::departure(stop("A"), 1000), StopTime::arrival(stop("B"), 1030)]),
                trip("T2", vec![StopTime::departure(stop("C"), 1100), StopTime::arrival(stop("D"), 1130)]),
            ],
            vec![Transfer::new(stop("B"), stop("C"), 10)],
        ))
        .build()
        .unwrap();

        let result = index.scan(&origins("A", 900), date());

        assert!(result.connections.get(&stop("B"), 1).is_some());
        assert!(matches!(
            result.connections.get(&stop("C"), 2),
            Some(Connection::Transfer(_))
        ));
        assert!(result.connections.get(&stop("D"), 3).is_some());
        assert_eq!(result.arrivals.get(&stop("C")), Some(1040));
        assert_eq!(result.arrivals.get(&stop("D")), Some(1130));
        assert_eq!(result.arrivals.get(&stop("A")), Some(900));
    }

    #[test]
    fn unknown_origin_reaches_nothing() {
        let index = RaptorIndex::builder(timetable(
            vec![trip("T1", vec![StopTime::departure(stop("A"), 1000), StopTime::arrival(stop("B"), 1030)])],
            vec![],
        ))
        .build()
        .unwrap();

        let result = index.scan(&origins("Z", 900), date());

        assert!(result.connections.is_empty());
    }

    #[test]
    fn transfer_window_respected() {
        let index = RaptorIndex::builder(timetable(
            vec![trip("T1", vec![StopTime::departure(stop("A"), 1000), StopTime::arrival(stop("B"), 1030)])],
            vec![Transfer::new(stop("B"), stop("C"), 10).with_window(0, 1000)],
        ))
        .build()
        .unwrap();

        let result = index.scan(&origins("A", 900), date());

        assert!(!result.connections.is_reached(&stop("C")));
    }

    #[test]
    fn round_limit_stops_scan() {
        let index = RaptorIndex::builder(timetable(
            vec![
                trip("T1", vec![StopTime::departure(stop("A"), 1000), StopTime::arrival(stop("B"), 1030)]),
                trip("T2", vec![StopTime::departure(stop("B"), 1100), StopTime::arrival(stop("C"), 1130)]),
            ],
            vec![],
        ))
        .config(PlannerConfig {
            max_rounds: 1,
            ..PlannerConfig::default()
        })
        .build()
        .unwrap();

        let result = index.scan(&origins("A", 900), date());

        assert!(result.connections.is_reached(&stop("B")));
        assert!(!result.connections.is_reached(&stop("C")));
    }

    #[test]
    fn interchange_added_to_arrivals() {
        let mut tt = timetable(
            vec![
                trip("T1", vec![StopTime::departure(stop("A"), 1000), StopTime::arrival(stop("B"), 1030)]),
                trip("T2", vec![StopTime::departure(stop("B"), 1031), StopTime::arrival(stop("C"), 1100)]),
                trip("T3", vec![StopTime::departure(stop("B"), 1040), StopTime::arrival(stop("C"), 1110)]),
            ],
            vec![],
        );
        tt.interchange.insert(stop("B"), 5);
        let index = RaptorIndex::builder(tt).build().unwrap();

        let result = index.scan(&origins("A", 900), date());

        assert_eq!(result.arrivals.get(&stop("B")), Some(1035));
        match result.connections.get(&stop("C"), 2) {
            Some(Connection::Timetable { trip, .. }) => assert_eq!(trip.trip_id, TripId::new("T3")),
            other => panic!("expected a ride on T3, got {:?}", other),
        }
    }
}
