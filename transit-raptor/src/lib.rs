//! Round-based public transit journey planning.
//!
//! A [`raptor::RaptorIndex`] is built once from a timetable of trips,
//! calendars and transfers. The orchestrators in [`query`] run scans over
//! it and turn the results into [`domain::Journey`]s or, for transfer
//! pattern precomputation, into the aggregates in [`transfer_pattern`].

pub mod config;
pub mod domain;
pub mod query;
pub mod raptor;
pub mod results;
pub mod transfer_pattern;
