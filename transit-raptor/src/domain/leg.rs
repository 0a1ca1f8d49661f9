//! Journey leg types.
//!
//! A `TimetableLeg` is a ride on one trip from boarding to alighting. It uses
//! `Arc<Trip>` so journeys can share trips with the index that produced them.

use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::{DomainError, StopId, StopTime, Time, Transfer, Trip};

/// A ride on a single trip.
///
/// # Invariants
///
/// - `alight > board` (must travel forward on the trip)
/// - Both indices are valid for the trip's stop times
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableLeg {
    trip: Arc<Trip>,
    board: usize,
    alight: usize,
}

impl TimetableLeg {
    /// Construct a leg, validating the indices.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `alight <= board` or `alight` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use transit_raptor::domain::{ServiceId, StopId, StopTime, TimetableLeg, Trip, TripId};
    ///
    /// let a = StopId::parse("A").unwrap();
    /// let b = StopId::parse("B").unwrap();
    /// let trip = Arc::new(Trip::new(
    ///     TripId::new("T1"),
    ///     ServiceId::new("S1"),
    ///     vec![StopTime::departure(a, 1000), StopTime::arrival(b, 1030)],
    /// ));
    ///
    /// let leg = TimetableLeg::new(trip, 0, 1).unwrap();
    /// assert_eq!(leg.origin().as_str(), "A");
    /// assert_eq!(leg.arrival_time(), 1030);
    /// ```
    pub fn new(trip: Arc<Trip>, board: usize, alight: usize) -> Result<Self, DomainError> {
        if alight <= board {
            return Err(DomainError::InvalidLeg("alight must be after board"));
        }

        if alight >= trip.stop_times.len() {
            return Err(DomainError::InvalidLeg("alight index out of bounds"));
        }

        Ok(TimetableLeg {
            trip,
            board,
            alight,
        })
    }

    /// Returns the trip this leg is on.
    pub fn trip(&self) -> &Arc<Trip> {
        &self.trip
    }

    /// Returns the boarding index into the trip's stop times.
    pub fn board(&self) -> usize {
        self.board
    }

    /// Returns the alighting index into the trip's stop times.
    pub fn alight(&self) -> usize {
        self.alight
    }

    /// Stop times ridden, boarding and alighting calls included.
    pub fn stop_times(&self) -> &[StopTime] {
        // Safe: validated at construction
        &self.trip.stop_times[self.board..=self.alight]
    }

    /// Returns the boarding stop.
    pub fn origin(&self) -> &StopId {
        &self.trip.stop_times[self.board].stop
    }

    /// Returns the alighting stop.
    pub fn destination(&self) -> &StopId {
        &self.trip.stop_times[self.alight].stop
    }

    /// Departure time from the boarding stop.
    pub fn departure_time(&self) -> Time {
        self.trip.stop_times[self.board].departure_time
    }

    /// Arrival time at the alighting stop.
    pub fn arrival_time(&self) -> Time {
        self.trip.stop_times[self.alight].arrival_time
    }
}

impl Serialize for TimetableLeg {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TimetableLeg", 4)?;
        s.serialize_field("trip_id", &self.trip.trip_id)?;
        s.serialize_field("origin", self.origin())?;
        s.serialize_field("destination", self.destination())?;
        s.serialize_field("stop_times", self.stop_times())?;
        s.end()
    }
}

/// A leg of a journey: either a ride on a trip or a transfer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Leg {
    /// A ride on a trip
    Timetable(TimetableLeg),
    /// A footpath between stops
    Transfer(Transfer),
}

impl Leg {
    /// Returns the origin stop of this leg.
    pub fn origin(&self) -> &StopId {
        match self {
            Leg::Timetable(leg) => leg.origin(),
            Leg::Transfer(transfer) => &transfer.origin,
        }
    }

    /// Returns the destination stop of this leg.
    pub fn destination(&self) -> &StopId {
        match self {
            Leg::Timetable(leg) => leg.destination(),
            Leg::Transfer(transfer) => &transfer.destination,
        }
    }

    /// Returns true if this is a transfer.
    pub fn is_transfer(&self) -> bool {
        matches!(self, Leg::Transfer(_))
    }

    /// Returns the timetable leg if this is a ride on a trip.
    pub fn as_timetable(&self) -> Option<&TimetableLeg> {
        match self {
            Leg::Timetable(leg) => Some(leg),
            Leg::Transfer(_) => None,
        }
    }
}
