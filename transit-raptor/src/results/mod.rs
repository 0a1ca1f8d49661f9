//! Turning scan output into journeys and paths.

mod filter;
mod journeys;
mod paths;

pub use filter::{
    Criterion, JourneyFilter, MultipleCriteriaFilter, earliest_arrival, least_changes,
};
pub use journeys::get_results;
pub use paths::{Path, all_paths, get_path};
