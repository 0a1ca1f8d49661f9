//! Single scan query: journeys departing after a given time.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{Journey, StopId, Time};
use crate::raptor::RaptorIndex;
use crate::results::get_results;

/// Plans journeys from one origin with a single scan.
#[derive(Debug, Clone, Copy)]
pub struct DepartAfterQuery<'a> {
    index: &'a RaptorIndex,
}

impl<'a> DepartAfterQuery<'a> {
    /// Create a query over an index.
    pub fn new(index: &'a RaptorIndex) -> Self {
        Self { index }
    }

    /// Journeys from `origin` to `destination` leaving at or after `time`
    /// on `date`, one per number of legs.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use chrono::NaiveDate;
    /// use transit_raptor::domain::{Calendar, ServiceId, StopId, StopTime, Trip, TripId, WeekdayFlags};
    /// use transit_raptor::query::DepartAfterQuery;
    /// use transit_raptor::raptor::{RaptorIndex, Timetable};
    ///
    /// let stop = |s| StopId::parse(s).unwrap();
    /// let date = NaiveDate::from_ymd_opt(2018, 10, 16).unwrap();
    ///
    /// let mut calendars = HashMap::new();
    /// calendars.insert(ServiceId::new("S1"), Calendar::new(date, date, WeekdayFlags::all()));
    /// let trip = Trip::new(
    ///     TripId::new("T1"),
    ///     ServiceId::new("S1"),
    ///     vec![
    ///         StopTime::departure(stop("A"), 1000),
    ///         StopTime::new(stop("B"), 1030, 1035),
    ///         StopTime::arrival(stop("C"), 1100),
    ///     ],
    /// );
    /// let index = RaptorIndex::builder(Timetable { trips: vec![trip], calendars, ..Timetable::default() })
    ///     .build()
    ///     .unwrap();
    ///
    /// let journeys = DepartAfterQuery::new(&index).plan(&stop("A"), &stop("C"), date, 900);
    /// assert_eq!(journeys.len(), 1);
    /// assert_eq!(journeys[0].arrival_time(), 1100);
    /// ```
    pub fn plan(
        &self,
        origin: &StopId,
        destination: &StopId,
        date: NaiveDate,
        time: Time,
    ) -> Vec<Journey> {
        let origins = BTreeMap::from([(origin.clone(), time)]);
        let result = self.index.scan(&origins, date);
        let journeys = get_results(&result.connections, destination);

        debug!(%origin, %destination, %date, time, found = journeys.len(), "depart after query");
        journeys
    }
}
