//! Schedule source error types.

use crate::domain::{LineCode, StationCode};

/// Errors from the real-time schedule sources.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Upstream returned a non-success HTTP status
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Upstream answered with `status: 0`
    #[error("upstream error: {message}")]
    Upstream { message: String },

    /// Response had no entry for the requested station
    #[error("no data for {line}-{station}")]
    MissingStation { line: LineCode, station: StationCode },

    /// Source not usable (bad mock directory, closed semaphore)
    #[error("not configured: {0}")]
    NotConfigured(String),
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ScheduleError::Json {
            message: "eof".into(),
            body: None,
        };
        assert_eq!(err.to_string(), "JSON parse error: eof");

        let err = ScheduleError::MissingStation {
            line: LineCode::parse("TKL").unwrap(),
            station: StationCode::parse("TKO").unwrap(),
        };
        assert_eq!(err.to_string(), "no data for TKL-TKO");

        let err = ScheduleError::ApiError {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = ScheduleError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("<html>"));
    }
}
