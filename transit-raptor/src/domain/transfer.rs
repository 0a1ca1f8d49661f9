//! Transfer type.
//!
//! A `Transfer` is a precomputed fixed-cost edge between two stops, such as a
//! walk between platforms or a short footpath between nearby stops.

use serde::{Deserialize, Serialize};

use super::{Duration, StopId, Time};

/// A directed footpath between two stops.
///
/// Only usable when the arrival time at `destination` falls within
/// `[start_time, end_time]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Stop the transfer leaves from
    pub origin: StopId,
    /// Stop the transfer arrives at
    pub destination: StopId,
    /// Time taken to make the transfer
    pub duration: Duration,
    /// Earliest arrival time at the destination
    #[serde(default)]
    pub start_time: Time,
    /// Latest arrival time at the destination
    #[serde(default = "always")]
    pub end_time: Time,
}

fn always() -> Time {
    Time::MAX
}

impl Transfer {
    /// Creates a transfer that is valid at any time.
    pub fn new(origin: StopId, destination: StopId, duration: Duration) -> Self {
        Self {
            origin,
            destination,
            duration,
            start_time: 0,
            end_time: always(),
        }
    }

    /// Restricts the transfer to a window of arrival times.
    pub fn with_window(mut self, start_time: Time, end_time: Time) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    /// Can the transfer be used to arrive at `arrival`?
    pub fn is_valid_at(&self, arrival: Time) -> bool {
        self.start_time <= arrival && arrival <= self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    #[test]
    fn unrestricted_by_default() {
        let t = Transfer::new(stop("A"), stop("B"), 10);
        assert!(t.is_valid_at(0));
        assert!(t.is_valid_at(100_000));
    }

    #[test]
    fn window_is_inclusive() {
        let t = Transfer::new(stop("A"), stop("B"), 10).with_window(1000, 2000);
        assert!(!t.is_valid_at(999));
        assert!(t.is_valid_at(1000));
        assert!(t.is_valid_at(2000));
        assert!(!t.is_valid_at(2001));
    }

    #[test]
    fn deserialize_defaults_window() {
        let t: Transfer =
            serde_json::from_str(r#"{"origin":"A","destination":"B","duration":60}"#).unwrap();
        assert_eq!(t, Transfer::new(stop("A"), stop("B"), 60));
    }
}
