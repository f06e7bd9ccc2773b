//! Per-line schedule aggregation.
//!
//! Fetches one board per `(line, boarding station)` concurrently and folds the
//! results into one record per line.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDateTime;
use futures::future::join_all;
use tracing::debug;

use crate::domain::{LineCode, StationCode};
use crate::network::RailNetwork;

use super::convert::{ScheduleEntry, StationBoard};
use super::error::ScheduleError;
use super::source::ScheduleSource;

/// Upcoming departures kept per direction.
pub const MAX_DEPARTURES: usize = 5;

/// Aggregated schedule for one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSchedule {
    pub current_time: Option<NaiveDateTime>,
    pub system_time: Option<NaiveDateTime>,
    pub up: Vec<ScheduleEntry>,
    pub down: Vec<ScheduleEntry>,
    /// Set when no board could be obtained for this line.
    pub message: Option<String>,
}

pub type SchedulesByLine = BTreeMap<LineCode, LineSchedule>;

/// Outcome of a single fetch.
pub type FetchResult = (LineCode, StationCode, Result<StationBoard, ScheduleError>);

/// Drop entries sharing an arrival time. Each time keeps the position of its
/// first occurrence and the contents of its last.
pub fn dedup_by_time(entries: Vec<ScheduleEntry>) -> Vec<ScheduleEntry> {
    let mut positions: HashMap<NaiveDateTime, usize> = HashMap::new();
    let mut out: Vec<ScheduleEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match positions.get(&entry.time) {
            Some(&i) => out[i] = entry,
            None => {
                positions.insert(entry.time, out.len());
                out.push(entry);
            }
        }
    }
    out
}

fn upcoming(entries: Vec<ScheduleEntry>) -> Vec<ScheduleEntry> {
    let mut entries = dedup_by_time(entries);
    entries.truncate(MAX_DEPARTURES);
    entries
}

/// Fold fetch results into one record per line.
///
/// The first successful board for a line wins. UP is kept only when the
/// station is not the first of the line, DOWN only when it is not the last.
pub fn merge(network: &RailNetwork, results: Vec<FetchResult>) -> SchedulesByLine {
    let mut schedules = SchedulesByLine::new();
    let mut filled: HashSet<LineCode> = HashSet::new();

    for (line, station, result) in results {
        match result {
            Ok(board) => {
                if !filled.insert(line) {
                    continue;
                }
                let stops = network.line(line).map(|l| l.order().len()).unwrap_or(0);
                let position = network.line(line).and_then(|l| l.position(station));

                let up = match position {
                    Some(p) if p > 0 => upcoming(board.up),
                    _ => Vec::new(),
                };
                let down = match position {
                    Some(p) if p + 1 < stops => upcoming(board.down),
                    _ => Vec::new(),
                };

                schedules.insert(
                    line,
                    LineSchedule {
                        current_time: board.current_time,
                        system_time: board.system_time,
                        up,
                        down,
                        message: None,
                    },
                );
            }
            Err(e) => {
                debug!(line = %line, station = %station, error = %e, "no schedule");
                if filled.contains(&line) {
                    continue;
                }
                schedules.entry(line).or_default().message =
                    Some(format!("No schedule available for {station} on {line}"));
            }
        }
    }

    schedules
}

/// Fetch every boarding concurrently and merge the results.
///
/// A failed fetch never affects its siblings.
pub async fn collect<S: ScheduleSource>(
    source: &S,
    network: &RailNetwork,
    boardings: &[(LineCode, StationCode)],
) -> SchedulesByLine {
    let fetches = boardings.iter().map(|&(line, station)| async move {
        let result = source.fetch(line, station).await;
        (line, station, result)
    });
    let results = join_all(fetches).await;
    merge(network, results)
}
