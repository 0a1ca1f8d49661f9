//! RAPTOR scan engine.
//!
//! [`RaptorIndex`] is built once from a [`Timetable`] and then answers any
//! number of scans. Each scan owns its own mutable state (arrivals,
//! connections and route scanner cursors) and produces a [`ScanResult`]
//! that the `results` module turns into journeys or paths.

mod connection;
mod error;
mod index;
mod queue;
mod route_scanner;
mod scan;

pub use connection::{BestArrivals, Connection, ConnectionIndex, ScanResult};
pub use error::IndexError;
pub use index::{CalendarFilter, RaptorIndex, RaptorIndexBuilder, Timetable};
pub use route_scanner::RouteScanner;
