//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the timetable and journey model. They are distinct from index build
//! errors, which wrap them with context.

use super::StopId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Trip has no stop times
    #[error("trip has no stop times")]
    EmptyTrip,

    /// Stop times go backwards in time
    #[error("stop times out of order at position {position}")]
    UnorderedStopTimes { position: usize },

    /// Invalid leg construction (e.g., alight before board)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// Consecutive legs don't share a stop
    #[error("legs do not connect: {0} is not {1}")]
    LegsNotConnected(StopId, StopId),

    /// Journey has no legs
    #[error("journey must have at least one leg")]
    EmptyJourney,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyTrip;
        assert_eq!(err.to_string(), "trip has no stop times");

        let err = DomainError::UnorderedStopTimes { position: 3 };
        assert_eq!(err.to_string(), "stop times out of order at position 3");

        let err = DomainError::InvalidLeg("alight must be after board");
        assert_eq!(err.to_string(), "invalid leg: alight must be after board");

        let a = StopId::parse("A").unwrap();
        let b = StopId::parse("B").unwrap();
        let err = DomainError::LegsNotConnected(a, b);
        assert_eq!(err.to_string(), "legs do not connect: A is not B");

        let err = DomainError::EmptyJourney;
        assert_eq!(err.to_string(), "journey must have at least one leg");
    }
}
