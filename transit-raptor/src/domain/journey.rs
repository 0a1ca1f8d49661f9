//! Journey type.
//!
//! A `Journey` is a complete trip from origin to destination: one or more
//! legs, each a ride on a trip or a transfer between stops.

use serde::Serialize;

use super::{DomainError, Leg, ONE_DAY, StopId, Time};

/// A complete journey from origin to destination.
///
/// # Invariants
///
/// - At least one leg
/// - Consecutive legs connect (destination of one = origin of next)
///
/// The departure time is the departure of the first ride minus any transfers
/// before it, and the arrival time is the arrival of the last ride plus any
/// transfers after it. A journey made only of transfers has both set to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Journey {
    legs: Vec<Leg>,
    departure_time: Time,
    arrival_time: Time,
}

impl Journey {
    /// Constructs a journey from legs in travel order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - Legs list is empty
    /// - Legs don't connect (destination != next origin)
    pub fn new(legs: Vec<Leg>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyJourney);
        }

        for window in legs.windows(2) {
            let prev_dest = window[0].destination();
            let next_origin = window[1].origin();
            if prev_dest != next_origin {
                return Err(DomainError::LegsNotConnected(
                    prev_dest.clone(),
                    next_origin.clone(),
                ));
            }
        }

        let departure_time = departure_time(&legs);
        let arrival_time = arrival_time(&legs);

        Ok(Journey {
            legs,
            departure_time,
            arrival_time,
        })
    }

    /// Appends a journey found on the following service day.
    ///
    /// The result departs when `self` departs and arrives one day after
    /// `next` arrives, since `next` is timed relative to its own day.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `next` does not start where `self` ends.
    pub fn join_next_day(mut self, next: Journey) -> Result<Self, DomainError> {
        if self.destination() != next.origin() {
            return Err(DomainError::LegsNotConnected(
                self.destination().clone(),
                next.origin().clone(),
            ));
        }

        self.legs.extend(next.legs);
        self.arrival_time = next.arrival_time + ONE_DAY;
        Ok(self)
    }

    /// Returns all legs in order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns the number of legs, transfers included.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Returns the number of rides on trips (excluding transfers).
    pub fn ride_count(&self) -> usize {
        self.legs.iter().filter(|l| !l.is_transfer()).count()
    }

    /// Returns the origin stop.
    pub fn origin(&self) -> &StopId {
        // Safe: validated non-empty at construction
        self.legs[0].origin()
    }

    /// Returns the destination stop.
    pub fn destination(&self) -> &StopId {
        self.legs[self.legs.len() - 1].destination()
    }

    /// Returns the departure time from the origin.
    pub fn departure_time(&self) -> Time {
        self.departure_time
    }

    /// Returns the arrival time at the destination.
    pub fn arrival_time(&self) -> Time {
        self.arrival_time
    }
}

fn departure_time(legs: &[Leg]) -> Time {
    let mut transfer_duration = 0;

    for leg in legs {
        match leg {
            Leg::Timetable(ride) => {
                return ride.departure_time().saturating_sub(transfer_duration);
            }
            Leg::Transfer(transfer) => transfer_duration += transfer.duration,
        }
    }

    0
}

fn arrival_time(legs: &[Leg]) -> Time {
    let mut transfer_duration = 0;

    for leg in legs.iter().rev() {
        match leg {
            Leg::Timetable(ride) => return ride.arrival_time() + transfer_duration,
            Leg::Transfer(transfer) => transfer_duration += transfer.duration,
        }
    }

    0
}
