//! Stop identifier type.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid stop id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// An opaque stop identifier, e.g. a GTFS `stop_id` such as "NRW".
///
/// Stop ids are compared, hashed and ordered by their text. Cloning is cheap
/// (the text is reference counted), which matters because journeys, transfer
/// patterns and connection indexes all hold copies.
///
/// Ids may not be empty and may not contain a comma: transfer patterns are
/// stored as comma separated stop sequences.
///
/// # Examples
///
/// ```
/// use transit_raptor::domain::StopId;
///
/// let nrw = StopId::parse("NRW").unwrap();
/// assert_eq!(nrw.as_str(), "NRW");
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("A,B").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId(Arc<str>);

impl StopId {
    /// Parse a stop id from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        if s.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        if s.contains(',') {
            return Err(InvalidStopId {
                reason: "must not contain a comma",
            });
        }

        Ok(StopId(Arc::from(s)))
    }

    /// Returns the stop id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopId {
    type Error = InvalidStopId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StopId::parse(&value)
    }
}

impl From<StopId> for String {
    fn from(value: StopId) -> Self {
        value.0.to_string()
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.as_str())
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
