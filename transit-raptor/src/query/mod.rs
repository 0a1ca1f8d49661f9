//! Query orchestrators.
//!
//! Each query borrows a [`RaptorIndex`](crate::raptor::RaptorIndex) and
//! drives one or more scans over it:
//!
//! - [`DepartAfterQuery`]: one scan from one origin
//! - [`GroupStationDepartAfterQuery`]: several origins and destinations,
//!   continuing onto following days when nothing is found
//! - [`RangeQuery`]: repeated scans covering a whole day
//! - [`TransferPatternQuery`]: one scan per departure at an origin, feeding
//!   a transfer pattern compressor

mod depart_after;
mod group_station;
mod range;
mod transfer_pattern;


pub use depart_after::DepartAfterQuery;
pub use group_station::GroupStationDepartAfterQuery;
pub use range::RangeQuery;
pub use transfer_pattern::TransferPatternQuery;
