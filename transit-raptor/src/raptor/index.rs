//! Route index builder.
//!
//! Turns the timetable into the structures the scan works on: trips grouped
//! into routes that never overtake, the routes boarding at each stop, the
//! useful transfers from each stop and the interchange time at each stop.
//! Stops are interned to dense indices in id order.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::PlannerConfig;
use crate::domain::{Calendar, ServiceDay, ServiceId, StopId, Time, Transfer, Trip};

use super::error::IndexError;

pub(crate) type StopIdx = usize;
pub(crate) type RouteIdx = usize;

/// Parsed timetable data consumed by the index builder.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    /// Every trip in the feed
    pub trips: Vec<Trip>,
    /// Footpaths between stops
    pub transfers: Vec<Transfer>,
    /// Minimum buffer after arriving at a stop; stops not listed get 0
    pub interchange: HashMap<StopId, Time>,
    /// Calendar for each service id referenced by a trip
    pub calendars: HashMap<ServiceId, Calendar>,
}

/// Whether the route scanner checks trip calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarFilter {
    /// Check each trip's calendar against the query date
    ByDate,
    /// Trips were filtered to a single date when the index was built
    Prefiltered,
}

/// A trip together with its resolved calendar.
#[derive(Debug, Clone)]
pub(crate) struct RouteTrip {
    pub(crate) trip: Arc<Trip>,
    pub(crate) calendar: Arc<Calendar>,
}

impl RouteTrip {
    fn arrival(&self, position: usize) -> Time {
        self.trip.stop_times[position].arrival_time
    }

    pub(crate) fn departure(&self, position: usize) -> Time {
        self.trip.stop_times[position].departure_time
    }
}

/// Trips sharing a stop sequence and boarding pattern, in departure order.
///
/// No trip arrives at or departs from any stop before a trip earlier in
/// `trips`.
#[derive(Debug, Clone)]
pub(crate) struct Route {
    pub(crate) path: Vec<StopIdx>,
    pub(crate) pick_up: Vec<bool>,
    pub(crate) drop_off: Vec<bool>,
    pub(crate) trips: Vec<RouteTrip>,
    positions: HashMap<StopIdx, usize>,
}

impl Route {
    /// First position of `stop` on this route.
    pub(crate) fn position(&self, stop: StopIdx) -> Option<usize> {
        self.positions.get(&stop).copied()
    }
}

/// Bidirectional mapping between stop ids and dense indices.
#[derive(Debug, Clone, Default)]
pub(crate) struct StopRegistry {
    ids: Vec<StopId>,
    lookup: HashMap<StopId, StopIdx>,
}

impl StopRegistry {
    fn new(stops: BTreeSet<StopId>) -> Self {
        let ids: Vec<StopId> = stops.into_iter().collect();
        let lookup = ids
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();
        Self { ids, lookup }
    }

    pub(crate) fn index(&self, stop: &StopId) -> Option<StopIdx> {
        self.lookup.get(stop).copied()
    }

    pub(crate) fn id(&self, index: StopIdx) -> &StopId {
        &self.ids[index]
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Preprocessed, read-only network data for RAPTOR scans.
///
/// Build one with [`RaptorIndex::builder`]. The index is never mutated after
/// construction, so it can be shared between threads running independent
/// scans.
#[derive(Debug, Clone)]
pub struct RaptorIndex {
    pub(crate) stops: StopRegistry,
    pub(crate) routes: Vec<Route>,
    pub(crate) routes_at_stop: Vec<Vec<RouteIdx>>,
    pub(crate) transfers: Vec<Vec<(StopIdx, Transfer)>>,
    pub(crate) interchange: Vec<Time>,
    pub(crate) departure_times: Vec<Vec<Time>>,
    pub(crate) calendar_filter: CalendarFilter,
    pub(crate) config: PlannerConfig,
}

impl RaptorIndex {
    /// Start building an index from a timetable.
    pub fn builder(timetable: Timetable) -> RaptorIndexBuilder {
        RaptorIndexBuilder::new(timetable)
    }

    /// Returns the configuration the index was built with.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Returns how the route scanner treats calendars.
    pub fn calendar_filter(&self) -> CalendarFilter {
        self.calendar_filter
    }

    /// Returns the number of stops in the index.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Returns the number of routes.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if `stop` is served by a route or reachable by transfer.
    pub fn contains_stop(&self, stop: &StopId) -> bool {
        self.stops.index(stop).is_some()
    }

    /// Distinct departure times at `stop` where passengers may board,
    /// in ascending order.
    pub fn departure_times(&self, stop: &StopId) -> &[Time] {
        match self.stops.index(stop) {
            Some(s) => &self.departure_times[s],
            None => &[],
        }
    }

    /// Trips of each route in departure order, routes in build order.
    pub fn route_trips(&self) -> Vec<Vec<&Trip>> {
        self.routes
            .iter()
            .map(|r| r.trips.iter().map(|t| t.trip.as_ref()).collect())
            .collect()
    }
}

/// Builder for [`RaptorIndex`].
#[derive(Debug, Clone)]
pub struct RaptorIndexBuilder {
    timetable: Timetable,
    date: Option<NaiveDate>,
    config: PlannerConfig,
}

impl RaptorIndexBuilder {
    /// Create a builder with the default configuration and no date filter.
    pub fn new(timetable: Timetable) -> Self {
        Self {
            timetable,
            date: None,
            config: PlannerConfig::default(),
        }
    }

    /// Only keep trips running on `date`.
    ///
    /// Scans get faster, but the index can then only answer queries for
    /// that date.
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the planner configuration.
    pub fn config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the timetable and build the index.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a trip is malformed or references a service id with
    /// no calendar.
    pub fn build(self) -> Result<RaptorIndex, IndexError> {
        let Timetable {
            trips,
            transfers,
            interchange,
            calendars,
        } = self.timetable;

        let calendars: HashMap<ServiceId, Arc<Calendar>> = calendars
            .into_iter()
            .map(|(id, calendar)| (id, Arc::new(calendar)))
            .collect();

        let mut route_trips = Vec::with_capacity(trips.len());
        for trip in trips {
            trip.validate().map_err(|source| IndexError::InvalidTrip {
                trip_id: trip.trip_id.clone(),
                source,
            })?;

            let calendar = calendars
                .get(&trip.service_id)
                .ok_or_else(|| IndexError::UnknownService {
                    trip_id: trip.trip_id.clone(),
                    service_id: trip.service_id.clone(),
                })?
                .clone();

            route_trips.push(RouteTrip {
                trip: Arc::new(trip),
                calendar,
            });
        }

        if let Some(date) = self.date {
            let day = ServiceDay::new(date);
            let before = route_trips.len();
            route_trips.retain(|t| t.calendar.runs_on_day(day));
            debug!(%date, kept = route_trips.len(), dropped = before - route_trips.len(), "filtered trips by date");
        }

        // Stable, so trips departing together keep their input order
        route_trips.sort_by_key(|t| t.departure(0));

        let pending = partition(route_trips);

        let route_stops: BTreeSet<StopId> = pending
            .iter()
            .flat_map(|r| r.signature.iter().map(|(stop, _, _)| stop.clone()))
            .collect();

        let useful_transfers: Vec<Transfer> = transfers
            .into_iter()
            .filter(|t| route_stops.contains(&t.origin))
            .collect();

        let mut all_stops = route_stops;
        all_stops.extend(useful_transfers.iter().map(|t| t.destination.clone()));
        let stops = StopRegistry::new(all_stops);

        let mut routes_at_stop: Vec<Vec<RouteIdx>> = vec![Vec::new(); stops.len()];
        let mut departure_times: Vec<BTreeSet<Time>> = vec![BTreeSet::new(); stops.len()];
        let mut routes = Vec::with_capacity(pending.len());

        for (route_idx, pending_route) in pending.into_iter().enumerate() {
            let route = pending_route.resolve(&stops)?;

            for (pos, &stop) in route.path.iter().enumerate() {
                if !route.pick_up[pos] {
                    continue;
                }
                if routes_at_stop[stop].last() != Some(&route_idx) {
                    routes_at_stop[stop].push(route_idx);
                }
                departure_times[stop].extend(route.trips.iter().map(|t| t.departure(pos)));
            }

            routes.push(route);
        }

        let mut transfers_by_origin: Vec<Vec<(StopIdx, Transfer)>> = vec![Vec::new(); stops.len()];
        for transfer in useful_transfers {
            // Both ends were added to the registry above
            if let (Some(origin), Some(destination)) = (
                stops.index(&transfer.origin),
                stops.index(&transfer.destination),
            ) {
                transfers_by_origin[origin].push((destination, transfer));
            }
        }

        let interchange = (0..stops.len())
            .map(|s| interchange.get(stops.id(s)).copied().unwrap_or(0))
            .collect();

        let calendar_filter = match self.date {
            Some(_) => CalendarFilter::Prefiltered,
            None => CalendarFilter::ByDate,
        };

        debug!(
            stops = stops.len(),
            routes = routes.len(),
            ?calendar_filter,
            "built raptor index"
        );

        Ok(RaptorIndex {
            stops,
            routes,
            routes_at_stop,
            transfers: transfers_by_origin,
            interchange,
            departure_times: departure_times
                .into_iter()
                .map(|times| times.into_iter().collect())
                .collect(),
            calendar_filter,
            config: self.config,
        })
    }
}

/// Stop sequence plus pick-up and drop-off flags of a trip.
type Signature = Vec<(StopId, bool, bool)>;

/// A route before its stops have been interned.
struct PendingRoute {
    signature: Signature,
    trips: Vec<RouteTrip>,
}

impl PendingRoute {
    fn resolve(self, stops: &StopRegistry) -> Result<Route, IndexError> {
        let mut path = Vec::with_capacity(self.signature.len());
        let mut pick_up = Vec::with_capacity(self.signature.len());
        let mut drop_off = Vec::with_capacity(self.signature.len());

        for (stop, up, off) in &self.signature {
            let idx = stops
                .index(stop)
                .ok_or_else(|| IndexError::UnregisteredStop { stop: stop.clone() })?;
            path.push(idx);
            pick_up.push(*up);
            drop_off.push(*off);
        }

        // Filled in reverse so a stop visited twice keeps its first position
        let mut positions = HashMap::with_capacity(path.len());
        for (pos, &stop) in path.iter().enumerate().rev() {
            positions.insert(stop, pos);
        }

        Ok(Route {
            path,
            pick_up,
            drop_off,
            trips: self.trips,
            positions,
        })
    }
}

fn signature(trip: &Trip) -> Signature {
    trip.stop_times
        .iter()
        .map(|st| (st.stop.clone(), st.pick_up, st.drop_off))
        .collect()
}

/// Can `next` follow `last` on a route without overtaking it?
fn follows(last: &RouteTrip, next: &RouteTrip) -> bool {
    (0..last.trip.stop_times.len())
        .all(|i| next.arrival(i) >= last.arrival(i) && next.departure(i) >= last.departure(i))
}

/// Group trips, already sorted by first departure, into routes.
///
/// Trips with the same signature share a route unless the new trip would
/// overtake the route's latest trip at some stop, in which case it is tried
/// against the next route with that signature, and a new route is created
/// if none accepts it.
fn partition(trips: Vec<RouteTrip>) -> Vec<PendingRoute> {
    let mut routes: Vec<PendingRoute> = Vec::new();
    let mut variants: HashMap<Signature, Vec<RouteIdx>> = HashMap::new();

    for trip in trips {
        let sig = signature(&trip.trip);
        let candidates = variants.entry(sig.clone()).or_default();

        let accepting = candidates.iter().copied().find(|&r| {
            routes[r]
                .trips
                .last()
                .is_none_or(|last| follows(last, &trip))
        });

        match accepting {
            Some(r) => routes[r].trips.push(trip),
            None => {
                candidates.push(routes.len());
                routes.push(PendingRoute {
                    signature: sig,
                    trips: vec![trip],
                });
            }
        }
    }

    routes
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{StopTime, TripId, WeekdayFlags};
    use proptest::prelude::*;

    /// Trips over stops A, B, C with arbitrary (valid) timings
    fn trips() -> impl Strategy<Value = Vec<Trip>> {
        prop::collection::vec((0u32..2000, 0u32..500, 0u32..500), 1..12).prop_map(|timings| {
            timings
                .into_iter()
                .enumerate()
                .map(|(i, (dep, ab, bc))| {
                    let stop = |s: &str| StopId::parse(s).unwrap();
                    Trip::new(
                        TripId::new(format!("T{}", i)),
                        ServiceId::new("S1"),
                        vec![
                            StopTime::departure(stop("A"), dep),
                            StopTime::new(stop("B"), dep + ab, dep + ab),
                            StopTime::arrival(stop("C"), dep + ab + bc),
                        ],
                    )
                })
                .collect()
        })
    }

    proptest! {
        /// Later trips on a route never arrive or depart earlier at any stop
        #[test]
        fn no_overtaking(trips in trips()) {
            let count = trips.len();
            let mut calendars = HashMap::new();
            calendars.insert(
                ServiceId::new("S1"),
                Calendar::new(
                    NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
                    NaiveDate::from_ymd_opt(2018, 12, 31).unwrap(),
                    WeekdayFlags::all(),
                ),
            );
            let index = RaptorIndex::builder(Timetable { trips, calendars, ..Timetable::default() })
                .build()
                .unwrap();

            let mut seen = 0;
            for route in &index.routes {
                seen += route.trips.len();
                for pair in route.trips.windows(2) {
                    for (a, b) in pair[0].trip.stop_times.iter().zip(&pair[1].trip.stop_times) {
                        prop_assert!(a.arrival_time <= b.arrival_time);
                        prop_assert!(a.departure_time <= b.departure_time);
                    }
                }
            }
            prop_assert_eq!(seen, count);
        }
    }
}
