//! Real-time rail schedules.
//!
//! This module provides an HTTP client for the MTR Next Train open-data API,
//! a file-backed mock for offline development, and the aggregator that turns
//! per-station boards into one schedule per line.
//!
//! Key characteristics of the upstream:
//! - One request per `(line, station)` pair
//! - Times are `YYYY-MM-DD HH:MM:SS`, Hong Kong local time
//! - A suspended line answers `status: 0` with no `data`

mod aggregate;
mod client;
mod convert;
mod error;
mod mock;
mod source;
mod types;

pub use aggregate::{
    FetchResult, LineSchedule, MAX_DEPARTURES, SchedulesByLine, collect, dedup_by_time, merge,
};
pub use client::{MtrScheduleClient, ScheduleConfig};
pub use convert::{ScheduleEntry, StationBoard, convert_response, parse_timestamp};
pub use error::ScheduleError;
pub use mock::MockScheduleSource;
pub use source::{ScheduleBackend, ScheduleSource};
pub use types::{DepartureDto, ScheduleResponse, StationScheduleDto};
