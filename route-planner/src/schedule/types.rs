//! MTR Next Train API response DTOs.
//!
//! These map directly onto the `getSchedule.php` JSON. Every field is
//! optional because the upstream omits data when a line is suspended.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Response body for one `(line, station)` request.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleResponse {
    /// 1 for success, 0 for an upstream error.
    #[serde(default)]
    pub status: Option<i64>,

    #[serde(default)]
    pub message: Option<String>,

    /// Time the upstream system produced the data (`YYYY-MM-DD HH:MM:SS`).
    #[serde(default)]
    pub sys_time: Option<String>,

    /// Current server time (`YYYY-MM-DD HH:MM:SS`).
    #[serde(default)]
    pub curr_time: Option<String>,

    /// Keyed by `"<LINE>-<STATION>"`.
    #[serde(default)]
    pub data: Option<HashMap<String, StationScheduleDto>>,
}

/// Upcoming trains at one station of one line.
#[derive(Debug, Clone, Deserialize)]
pub struct StationScheduleDto {
    #[serde(default)]
    pub curr_time: Option<String>,

    #[serde(default)]
    pub sys_time: Option<String>,

    #[serde(rename = "UP", default)]
    pub up: Option<Vec<DepartureDto>>,

    #[serde(rename = "DOWN", default)]
    pub down: Option<Vec<DepartureDto>>,
}

/// One upcoming train.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartureDto {
    /// Expected arrival time (`YYYY-MM-DD HH:MM:SS`).
    pub time: String,

    /// Platform number.
    #[serde(default, deserialize_with = "loose_string")]
    pub plat: Option<String>,

    /// Destination station code.
    #[serde(default, deserialize_with = "loose_string")]
    pub dest: Option<String>,

    /// Position of this train in the list.
    #[serde(default, deserialize_with = "loose_string")]
    pub seq: Option<String>,

    /// Minutes until arrival.
    #[serde(default, deserialize_with = "loose_string")]
    pub ttnt: Option<String>,

    /// `"Y"` when the entry is valid.
    #[serde(default, deserialize_with = "loose_string")]
    pub valid: Option<String>,
}

/// The upstream sends some numeric fields as strings and others as numbers.
fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(if b { "Y" } else { "N" }.to_string()),
        _ => None,
    })
}
