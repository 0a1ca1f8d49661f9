//! Stop time type.
//!
//! A `StopTime` is one call of a trip at a stop: when the vehicle arrives,
//! when it departs, and whether passengers may board or alight there.

use serde::{Deserialize, Serialize};

use super::{StopId, Time};

/// A call of a trip at a stop.
///
/// # Boarding Semantics
///
/// - `pick_up`: passengers may board here (GTFS `pickup_type` 0)
/// - `drop_off`: passengers may alight here (GTFS `drop_off_type` 0)
///
/// Origins usually only pick up and terminating stops only drop off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopTime {
    /// Stop served by this call
    pub stop: StopId,
    /// Arrival time at the stop
    pub arrival_time: Time,
    /// Departure time from the stop
    pub departure_time: Time,
    /// Whether passengers may board
    pub pick_up: bool,
    /// Whether passengers may alight
    pub drop_off: bool,
}

impl StopTime {
    /// Creates a call where passengers may both board and alight.
    pub fn new(stop: StopId, arrival_time: Time, departure_time: Time) -> Self {
        Self {
            stop,
            arrival_time,
            departure_time,
            pick_up: true,
            drop_off: true,
        }
    }

    /// Creates a boarding-only call, typically the origin of a trip.
    ///
    /// The arrival time is set to the departure time.
    pub fn departure(stop: StopId, departure_time: Time) -> Self {
        Self {
            stop,
            arrival_time: departure_time,
            departure_time,
            pick_up: true,
            drop_off: false,
        }
    }

    /// Creates an alighting-only call, typically the end of a trip.
    ///
    /// The departure time is set to the arrival time.
    pub fn arrival(stop: StopId, arrival_time: Time) -> Self {
        Self {
            stop,
            arrival_time,
            departure_time: arrival_time,
            pick_up: false,
            drop_off: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    #[test]
    fn new_allows_both() {
        let st = StopTime::new(stop("B"), 1030, 1035);
        assert!(st.pick_up);
        assert!(st.drop_off);
        assert_eq!(st.arrival_time, 1030);
        assert_eq!(st.departure_time, 1035);
    }

    #[test]
    fn departure_only_picks_up() {
        let st = StopTime::departure(stop("A"), 1000);
        assert!(st.pick_up);
        assert!(!st.drop_off);
        assert_eq!(st.arrival_time, 1000);
    }

    #[test]
    fn arrival_only_drops_off() {
        let st = StopTime::arrival(stop("C"), 1100);
        assert!(!st.pick_up);
        assert!(st.drop_off);
        assert_eq!(st.departure_time, 1100);
    }
}
