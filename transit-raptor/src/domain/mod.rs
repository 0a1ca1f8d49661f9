//! Domain types for the journey planner.
//!
//! This module contains the timetable model consumed by the RAPTOR index
//! (stops, stop times, trips, calendars, transfers) and the journeys it
//! produces. Types that carry invariants enforce them at construction time,
//! so code that receives them can trust their validity.

mod calendar;
mod error;
mod journey;
mod leg;
mod stop;
mod stop_time;
mod time;
mod transfer;
mod trip;

pub use calendar::{Calendar, ServiceDay, WeekdayFlags};
pub use error::DomainError;
pub use journey::Journey;
pub use leg::{Leg, TimetableLeg};
pub use stop::{InvalidStopId, StopId};
pub use stop_time::StopTime;
pub use time::{Duration, ONE_DAY, Time, TimeError, format_time, parse_time};
pub use transfer::Transfer;
pub use trip::{ServiceId, Trip, TripId};
