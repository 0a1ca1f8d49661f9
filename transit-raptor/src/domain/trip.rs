//! Trip types.
//!
//! A `Trip` is one run of a vehicle along an ordered sequence of stop times,
//! operating on the days given by the calendar of its service.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DomainError, StopTime, Time};

/// GTFS `trip_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(pub String);

impl TripId {
    /// Creates a trip id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// GTFS `service_id`, used to find the calendar of a trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(pub String);

impl ServiceId {
    /// Creates a service id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single vehicle run.
///
/// # Invariants (checked by [`Trip::validate`])
///
/// - At least one stop time
/// - `arrival_time <= departure_time` at every stop
/// - Times never decrease along the sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// Trip identifier
    pub trip_id: TripId,
    /// Service whose calendar says when this trip runs
    pub service_id: ServiceId,
    /// Calls in travel order
    pub stop_times: Vec<StopTime>,
}

impl Trip {
    /// Creates a trip without validating it.
    pub fn new(trip_id: TripId, service_id: ServiceId, stop_times: Vec<StopTime>) -> Self {
        Self {
            trip_id,
            service_id,
            stop_times,
        }
    }

    /// Check the stop time invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.stop_times.is_empty() {
            return Err(DomainError::EmptyTrip);
        }

        let mut previous: Time = 0;
        for (position, st) in self.stop_times.iter().enumerate() {
            if st.arrival_time < previous || st.departure_time < st.arrival_time {
                return Err(DomainError::UnorderedStopTimes { position });
            }
            previous = st.departure_time;
        }

        Ok(())
    }

    /// Departure time from the first stop.
    pub fn first_departure(&self) -> Option<Time> {
        self.stop_times.first().map(|st| st.departure_time)
    }

    /// Arrival time at the last stop.
    pub fn last_arrival(&self) -> Option<Time> {
        self.stop_times.last().map(|st| st.arrival_time)
    }

    /// Returns the number of stop times.
    pub fn len(&self) -> usize {
        self.stop_times.len()
    }

    /// Returns true if there are no stop times.
    pub fn is_empty(&self) -> bool {
        self.stop_times.is_empty()
    }
}
