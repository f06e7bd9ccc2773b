//! Conversion from schedule DTOs to domain types.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::domain::{LineCode, StationCode};

use super::error::ScheduleError;
use super::types::{DepartureDto, ScheduleResponse};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One upcoming train at a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Expected arrival, Hong Kong local time.
    pub time: NaiveDateTime,
    pub platform: Option<String>,
    pub destination: Option<String>,
    pub sequence: Option<u32>,
    pub minutes_away: Option<u32>,
    pub valid: bool,
}

/// Converted response for one `(line, station)` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationBoard {
    pub line: LineCode,
    pub station: StationCode,
    pub current_time: Option<NaiveDateTime>,
    pub system_time: Option<NaiveDateTime>,
    pub up: Vec<ScheduleEntry>,
    pub down: Vec<ScheduleEntry>,
}

/// Parse an upstream timestamp; `-` and malformed values are `None`.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIME_FORMAT).ok()
}

/// Extract the board for `line`/`station` from a response.
pub fn convert_response(
    line: LineCode,
    station: StationCode,
    response: &ScheduleResponse,
) -> Result<StationBoard, ScheduleError> {
    if response.status == Some(0) {
        return Err(ScheduleError::Upstream {
            message: response
                .message
                .clone()
                .unwrap_or_else(|| "unknown error".to_string()),
        });
    }

    let key = format!("{line}-{station}");
    let entry = response
        .data
        .as_ref()
        .and_then(|d| d.get(&key))
        .ok_or(ScheduleError::MissingStation { line, station })?;

    let current_time = entry
        .curr_time
        .as_deref()
        .or(response.curr_time.as_deref())
        .and_then(parse_timestamp);
    let system_time = entry
        .sys_time
        .as_deref()
        .or(response.sys_time.as_deref())
        .and_then(parse_timestamp);

    Ok(StationBoard {
        line,
        station,
        current_time,
        system_time,
        up: convert_departures(&key, entry.up.as_deref().unwrap_or(&[])),
        down: convert_departures(&key, entry.down.as_deref().unwrap_or(&[])),
    })
}

fn convert_departures(key: &str, departures: &[DepartureDto]) -> Vec<ScheduleEntry> {
    departures
        .iter()
        .filter_map(|d| {
            let Some(time) = parse_timestamp(&d.time) else {
                debug!(board = key, time = %d.time, "dropping departure with unparseable time");
                return None;
            };
            Some(ScheduleEntry {
                time,
                platform: d.plat.clone(),
                destination: d.dest.clone(),
                sequence: d.seq.as_deref().and_then(|s| s.trim().parse().ok()),
                minutes_away: d.ttnt.as_deref().and_then(|s| s.trim().parse().ok()),
                valid: d.valid.as_deref().is_none_or(|v| v.eq_ignore_ascii_case("Y")),
            })
        })
        .collect()
}
