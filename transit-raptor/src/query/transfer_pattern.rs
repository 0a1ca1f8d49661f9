//! Transfer pattern query: every optimal path from an origin over a day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::StopId;
use crate::raptor::RaptorIndex;
use crate::transfer_pattern::TransferPatternResults;

/// Runs one scan per boarding time at an origin and aggregates the paths.
#[derive(Debug, Clone, Copy)]
pub struct TransferPatternQuery<'a> {
    index: &'a RaptorIndex,
}

impl<'a> TransferPatternQuery<'a> {
    /// Create a query over an index.
    pub fn new(index: &'a RaptorIndex) -> Self {
        Self { index }
    }

    /// Scan from `origin` at every distinct time a trip can be boarded
    /// there, latest first, feeding each scan into `results`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use chrono::NaiveDate;
    /// use transit_raptor::domain::{Calendar, ServiceId, StopId, StopTime, Trip, TripId, WeekdayFlags};
    /// use transit_raptor::query::TransferPatternQuery;
    /// use transit_raptor::raptor::{RaptorIndex, Timetable};
    /// use transit_raptor::transfer_pattern::StringResults;
    ///
    /// let stop = |s| StopId::parse(s).unwrap();
    /// let date = NaiveDate::from_ymd_opt(2018, 10, 16).unwrap();
    ///
    /// let mut calendars = HashMap::new();
    /// calendars.insert(ServiceId::new("S1"), Calendar::new(date, date, WeekdayFlags::all()));
    /// let trips = vec![
    ///     Trip::new(TripId::new("T1"), ServiceId::new("S1"),
    ///         vec![StopTime::departure(stop("A"), 1000), StopTime::arrival(stop("B"), 1030)]),
    ///     Trip::new(TripId::new("T2"), ServiceId::new("S1"),
    ///         vec![StopTime::departure(stop("B"), 1100), StopTime::arrival(stop("C"), 1130)]),
    /// ];
    /// let index = RaptorIndex::builder(Timetable { trips, calendars, ..Timetable::default() })
    ///     .build()
    ///     .unwrap();
    ///
    /// let patterns = TransferPatternQuery::new(&index).plan(&stop("A"), date, StringResults::new());
    /// assert!(patterns.get(&stop("A"), &stop("C")).unwrap().contains("B"));
    /// ```
    pub fn plan<R: TransferPatternResults>(
        &self,
        origin: &StopId,
        date: NaiveDate,
        mut results: R,
    ) -> R::Output {
        let times = self.index.departure_times(origin);

        for &time in times.iter().rev() {
            let origins = BTreeMap::from([(origin.clone(), time)]);
            let scan = self.index.scan(&origins, date);
            results.add(&scan.connections);
        }

        debug!(%origin, %date, scans = times.len(), "transfer pattern query");
        results.finalize()
    }
}
