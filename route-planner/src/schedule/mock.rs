//! Mock schedule source for development without network access.
//!
//! Loads recorded upstream responses from JSON files and serves them as if
//! they were live.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{LineCode, StationCode};

use super::convert::{StationBoard, convert_response};
use super::error::ScheduleError;
use super::source::ScheduleSource;
use super::types::ScheduleResponse;

/// Serves boards from `<LINE>-<STA>.json` files.
#[derive(Debug, Clone)]
pub struct MockScheduleSource {
    responses: Arc<HashMap<(LineCode, StationCode), ScheduleResponse>>,
}

impl MockScheduleSource {
    /// Load every `<LINE>-<STA>.json` file in `data_dir`, for example
    /// `TKL-TKO.json`. Other files are ignored.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let data_dir = data_dir.as_ref();
        let mut responses = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            ScheduleError::NotConfigured(format!("failed to read mock data directory: {e}"))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                ScheduleError::NotConfigured(format!("failed to read directory entry: {e}"))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(key) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(parse_file_key)
            else {
                continue;
            };

            let json = std::fs::read_to_string(&path).map_err(|e| {
                ScheduleError::NotConfigured(format!("failed to read {}: {e}", path.display()))
            })?;
            let response: ScheduleResponse =
                serde_json::from_str(&json).map_err(|e| ScheduleError::Json {
                    message: format!("failed to parse {}: {e}", path.display()),
                    body: None,
                })?;

            responses.insert(key, response);
        }

        if responses.is_empty() {
            return Err(ScheduleError::NotConfigured(format!(
                "no mock schedule files found in {}",
                data_dir.display()
            )));
        }

        Ok(Self {
            responses: Arc::new(responses),
        })
    }

    /// Number of loaded boards.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Mimics [`MtrScheduleClient::get_schedule`](super::MtrScheduleClient::get_schedule).
    pub async fn get_schedule(
        &self,
        line: LineCode,
        station: StationCode,
    ) -> Result<StationBoard, ScheduleError> {
        let response = self
            .responses
            .get(&(line, station))
            .ok_or(ScheduleError::MissingStation { line, station })?;
        convert_response(line, station, response)
    }
}

impl ScheduleSource for MockScheduleSource {
    async fn fetch(
        &self,
        line: LineCode,
        station: StationCode,
    ) -> Result<StationBoard, ScheduleError> {
        self.get_schedule(line, station).await
    }
}

fn parse_file_key(stem: &str) -> Option<(LineCode, StationCode)> {
    let (line, station) = stem.split_once('-')?;
    Some((LineCode::parse(line).ok()?, StationCode::parse(station).ok()?))
}
