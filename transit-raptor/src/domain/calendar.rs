//! Service calendar for determining when trips run.
//!
//! Implements the GTFS `calendar.txt` / `calendar_dates.txt` rule: explicit
//! dates override the date range and weekday pattern.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Compact representation of which weekdays a service runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdayFlags {
    flags: u8,
}

impl WeekdayFlags {
    /// No days set.
    pub fn new() -> Self {
        Self { flags: 0 }
    }

    /// Every day of the week set.
    pub fn all() -> Self {
        Self { flags: 0b0111_1111 }
    }

    /// Flags from GTFS column order (Monday first).
    pub fn from_bools(days: [bool; 7]) -> Self {
        let mut flags = Self::new();
        for (i, &runs) in days.iter().enumerate() {
            if runs {
                flags.flags |= 1 << i;
            }
        }
        flags
    }

    /// Mark the service as running on `weekday`.
    pub fn set(&mut self, weekday: Weekday) {
        self.flags |= 1 << weekday.num_days_from_monday();
    }

    /// Mark the service as not running on `weekday`.
    pub fn unset(&mut self, weekday: Weekday) {
        self.flags &= !(1 << weekday.num_days_from_monday());
    }

    /// Does the service run on `weekday`?
    pub fn contains(&self, weekday: Weekday) -> bool {
        (self.flags & (1 << weekday.num_days_from_monday())) != 0
    }
}

/// A date together with its day of the week.
///
/// Computed once per query so the route scanner doesn't recompute the
/// weekday for every trip it checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceDay {
    /// Calendar date
    pub date: NaiveDate,
    /// Day of the week of `date`
    pub weekday: Weekday,
}

impl ServiceDay {
    /// Creates the service day for a date.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            weekday: date.weekday(),
        }
    }

    /// The following day, if representable.
    pub fn next(&self) -> Option<Self> {
        self.date.succ_opt().map(Self::new)
    }
}

/// Determines on which days a service operates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    /// First day of the regular schedule
    pub start_date: NaiveDate,
    /// Last day of the regular schedule (inclusive)
    pub end_date: NaiveDate,
    /// Weekdays of the regular schedule
    pub weekdays: WeekdayFlags,
    /// Service runs on these dates regardless of the regular schedule
    #[serde(default)]
    pub include: HashSet<NaiveDate>,
    /// Service does not run on these dates regardless of anything else
    #[serde(default)]
    pub exclude: HashSet<NaiveDate>,
}

impl Calendar {
    /// Creates a calendar with no exception dates.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, weekdays: WeekdayFlags) -> Self {
        Self {
            start_date,
            end_date,
            weekdays,
            include: HashSet::new(),
            exclude: HashSet::new(),
        }
    }

    /// Adds an explicit running date.
    pub fn with_included(mut self, date: NaiveDate) -> Self {
        self.include.insert(date);
        self
    }

    /// Adds an explicit non-running date.
    pub fn with_excluded(mut self, date: NaiveDate) -> Self {
        self.exclude.insert(date);
        self
    }

    /// Check if the service runs on a given date.
    ///
    /// Exclusions win over inclusions, and both win over the regular
    /// schedule.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{NaiveDate, Weekday};
    /// use transit_raptor::domain::{Calendar, WeekdayFlags};
    ///
    /// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
    /// let calendar = Calendar::new(d(2018, 10, 1), d(2018, 10, 15), WeekdayFlags::all())
    ///     .with_included(d(2018, 10, 22));
    ///
    /// assert!(calendar.runs_on(d(2018, 10, 10), Weekday::Wed));
    /// assert!(!calendar.runs_on(d(2018, 10, 16), Weekday::Tue));
    /// assert!(calendar.runs_on(d(2018, 10, 22), Weekday::Mon));
    /// ```
    pub fn runs_on(&self, date: NaiveDate, weekday: Weekday) -> bool {
        if self.exclude.contains(&date) {
            return false;
        }

        if self.include.contains(&date) {
            return true;
        }

        self.start_date <= date && date <= self.end_date && self.weekdays.contains(weekday)
    }

    /// Check if the service runs on a service day.
    pub fn runs_on_day(&self, day: ServiceDay) -> bool {
        self.runs_on(day.date, day.weekday)
    }
}
