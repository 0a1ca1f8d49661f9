//! Index build errors.

use crate::domain::{DomainError, ServiceId, StopId, TripId};

/// Error from building a [`RaptorIndex`](super::RaptorIndex).
///
/// The index refuses malformed input up front so that scans never have to
/// deal with it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// A trip failed validation
    #[error("invalid trip {trip_id}: {source}")]
    InvalidTrip {
        trip_id: TripId,
        #[source]
        source: DomainError,
    },

    /// A trip refers to a service with no calendar
    #[error("trip {trip_id} references unknown service {service_id}")]
    UnknownService {
        trip_id: TripId,
        service_id: ServiceId,
    },

    /// A route visits a stop the index never registered
    #[error("stop {stop} missing from the stop registry")]
    UnregisteredStop { stop: StopId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = IndexError::InvalidTrip {
            trip_id: TripId::new("T1"),
            source: DomainError::EmptyTrip,
        };
        assert_eq!(err.to_string(), "invalid trip T1: trip has no stop times");

        let err = IndexError::UnknownService {
            trip_id: TripId::new("T1"),
            service_id: ServiceId::new("S9"),
        };
        assert_eq!(err.to_string(), "trip T1 references unknown service S9");

        let err = IndexError::UnregisteredStop {
            stop: StopId::parse("X").unwrap(),
        };
        assert_eq!(err.to_string(), "stop X missing from the stop registry");
    }
}
