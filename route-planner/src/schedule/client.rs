//! MTR Next Train HTTP client.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{LineCode, StationCode};

use super::convert::{StationBoard, convert_response};
use super::error::ScheduleError;
use super::source::ScheduleSource;
use super::types::ScheduleResponse;

/// Default endpoint of the open-data Next Train API.
const DEFAULT_BASE_URL: &str = "https://rt.data.gov.hk/v1/transport/mtr/getSchedule.php";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Configuration for the schedule client.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Full URL of `getSchedule.php`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Response language (`en` or `tc`)
    pub lang: String,
}

impl ScheduleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            lang: "en".to_string(),
        }
    }
}

/// Live schedule client.
///
/// A semaphore bounds the number of requests in flight.
#[derive(Debug, Clone)]
pub struct MtrScheduleClient {
    http: reqwest::Client,
    base_url: String,
    lang: String,
    semaphore: Arc<Semaphore>,
}

impl MtrScheduleClient {
    pub fn new(config: ScheduleConfig) -> Result<Self, ScheduleError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            lang: config.lang,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Fetch upcoming trains for one station of one line.
    pub async fn get_schedule(
        &self,
        line: LineCode,
        station: StationCode,
    ) -> Result<StationBoard, ScheduleError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ScheduleError::NotConfigured("semaphore closed".to_string()))?;

        debug!(line = %line, station = %station, "fetching schedule");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("line", line.as_str()),
                ("sta", station.as_str()),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScheduleError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let parsed: ScheduleResponse =
            serde_json::from_str(&body).map_err(|e| ScheduleError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        convert_response(line, station, &parsed)
    }
}

impl ScheduleSource for MtrScheduleClient {
    async fn fetch(
        &self,
        line: LineCode,
        station: StationCode,
    ) -> Result<StationBoard, ScheduleError> {
        self.get_schedule(line, station).await
    }
}
