//! Journey filters.
//!
//! Query orchestrators take a list of filters and apply them in order to
//! the journeys they collect.

use std::fmt;

use crate::domain::Journey;

/// A post-processing step over a set of journeys.
pub trait JourneyFilter {
    /// Returns the journeys that pass the filter.
    fn apply(&self, journeys: Vec<Journey>) -> Vec<Journey>;
}

/// Returns true if `b` is at least as good as `a` by some measure.
pub type Criterion = Box<dyn Fn(&Journey, &Journey) -> bool + Send + Sync>;

/// `b` arrives no later than `a`.
pub fn earliest_arrival(a: &Journey, b: &Journey) -> bool {
    b.arrival_time() <= a.arrival_time()
}

/// `b` has no more legs than `a`.
pub fn least_changes(a: &Journey, b: &Journey) -> bool {
    b.leg_count() <= a.leg_count()
}

/// Removes journeys dominated on every configured criterion.
///
/// Journeys are sorted by departure time, latest arrival first among equal
/// departures. A journey is dropped if any journey after it in that order
/// is at least as good on every criterion. Of two journeys equal on every
/// criterion the later one is kept.
pub struct MultipleCriteriaFilter {
    criteria: Vec<Criterion>,
}

impl MultipleCriteriaFilter {
    /// Create a filter with custom criteria.
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }

    fn dominates(&self, a: &Journey, b: &Journey) -> bool {
        self.criteria.iter().all(|criterion| criterion(a, b))
    }
}

impl Default for MultipleCriteriaFilter {
    /// Arrival time and number of legs.
    fn default() -> Self {
        Self::new(vec![Box::new(earliest_arrival), Box::new(least_changes)])
    }
}

impl fmt::Debug for MultipleCriteriaFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipleCriteriaFilter")
            .field("criteria", &self.criteria.len())
            .finish()
    }
}

impl JourneyFilter for MultipleCriteriaFilter {
    fn apply(&self, mut journeys: Vec<Journey>) -> Vec<Journey> {
        journeys.sort_by(|a, b| {
            a.departure_time()
                .cmp(&b.departure_time())
                .then_with(|| b.arrival_time().cmp(&a.arrival_time()))
        });

        let keep: Vec<bool> = (0..journeys.len())
            .map(|i| {
                !journeys[i + 1..]
                    .iter()
                    .any(|later| self.dominates(&journeys[i], later))
            })
            .collect();

        journeys
            .into_iter()
            .zip(keep)
            .filter_map(|(journey, keep)| keep.then_some(journey))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{Leg, ServiceId, StopId, StopTime, Time, TimetableLeg, Trip, TripId};

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn ride(from: &str, dep: Time, to: &str, arr: Time) -> Leg {
        let trip = Trip::new(
            TripId::new(format!("{}{}{}", from, to, dep)),
            ServiceId::new("S1"),
            vec![
                StopTime::departure(stop(from), dep),
                StopTime::arrival(stop(to), arr),
            ],
        );
        Leg::Timetable(TimetableLeg::new(Arc::new(trip), 0, 1).unwrap())
    }

    /// A journey from A to C with the given times and number of legs.
    fn journey(dep: Time, arr: Time, legs: usize) -> Journey {
        let legs = match legs {
            1 => vec![ride("A", dep, "C", arr)],
            2 => vec![ride("A", dep, "B", dep + 1), ride("B", dep + 2, "C", arr)],
            _ => vec![
                ride("A", dep, "B", dep + 1),
                ride("B", dep + 2, "D", dep + 3),
                ride("D", dep + 4, "C", arr),
            ],
        };
        Journey::new(legs).unwrap()
    }

    fn times(journeys: &[Journey]) -> Vec<(Time, Time, usize)> {
        journeys
            .iter()
            .map(|j| (j.departure_time(), j.arrival_time(), j.leg_count()))
            .collect()
    }

    #[test]
    fn keeps_fastest_and_least_changes() {
        let slow_direct = journey(1000, 1300, 1);
        let fast_change = journey(1000, 1100, 2);

        let result = MultipleCriteriaFilter::default().apply(vec![slow_direct, fast_change]);

        assert_eq!(times(&result), vec![(1000, 1300, 1), (1000, 1100, 2)]);
    }

    #[test]
    fn drops_dominated() {
        let worse = journey(1000, 1300, 3);
        let better = journey(1000, 1100, 2);

        let result = MultipleCriteriaFilter::default().apply(vec![better, worse]);

        assert_eq!(times(&result), vec![(1000, 1100, 2)]);
    }

    #[test]
    fn later_departure_dominates_earlier() {
        let early = journey(900, 1200, 1);
        let late = journey(1000, 1200, 1);

        let result = MultipleCriteriaFilter::default().apply(vec![late, early]);

        assert_eq!(times(&result), vec![(1000, 1200, 1)]);
    }

    #[test]
    fn equal_journeys_collapse() {
        let result = MultipleCriteriaFilter::default().apply(vec![
            journey(1000, 1100, 1),
            journey(1000, 1100, 1),
        ]);

        assert_eq!(result.len(), 1);
    }

    #[test]
    fn keeps_journeys_sorted() {
        let result = MultipleCriteriaFilter::default().apply(vec![
            journey(1100, 1200, 1),
            journey(1000, 1050, 1),
        ]);

        assert_eq!(times(&result), vec![(1000, 1050, 1), (1100, 1200, 1)]);
    }

    #[test]
    fn custom_criteria() {
        let filter = MultipleCriteriaFilter::new(vec![Box::new(earliest_arrival)]);

        let result = filter.apply(vec![journey(1000, 1100, 2), journey(1000, 1200, 1)]);

        assert_eq!(times(&result), vec![(1000, 1100, 2)]);
    }
}

#[cfg(test)]
mod proptests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{Leg, ServiceId, StopId, StopTime, TimetableLeg, Trip, TripId};
    use proptest::prelude::*;

    fn journey((dep, duration, legs): (u32, u32, usize)) -> Journey {
        let stop = |i: usize| StopId::parse(&format!("S{}", i)).unwrap();
        let legs = (0..legs)
            .map(|i| {
                let trip = Trip::new(
                    TripId::new(format!("T{}", i)),
                    ServiceId::new("S1"),
                    vec![
                        StopTime::departure(stop(i), dep),
                        StopTime::arrival(stop(i + 1), dep + duration),
                    ],
                );
                Leg::Timetable(TimetableLeg::new(Arc::new(trip), 0, 1).unwrap())
            })
            .collect();
        Journey::new(legs).unwrap()
    }

    proptest! {
        /// Filtering twice gives the same result as filtering once
        #[test]
        fn idempotent(shapes in prop::collection::vec((0u32..100, 0u32..100, 1usize..4), 0..20)) {
            let filter = MultipleCriteriaFilter::default();
            let journeys: Vec<Journey> = shapes.into_iter().map(journey).collect();

            let once = filter.apply(journeys);
            let twice = filter.apply(once.clone());

            prop_assert_eq!(once, twice);
        }
    }
}
