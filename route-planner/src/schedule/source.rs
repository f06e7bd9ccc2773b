use std::future::Future;

use crate::domain::{LineCode, StationCode};

use super::client::MtrScheduleClient;
use super::convert::StationBoard;
use super::error::ScheduleError;
use super::mock::MockScheduleSource;

/// Anything that can supply a live board for one station of one line.
///
/// This abstraction lets the aggregator be tested without network access.
pub trait ScheduleSource {
    fn fetch(
        &self,
        line: LineCode,
        station: StationCode,
    ) -> impl Future<Output = Result<StationBoard, ScheduleError>> + Send;
}

/// Schedule source chosen at start-up.
#[derive(Debug, Clone)]
pub enum ScheduleBackend {
    Live(MtrScheduleClient),
    Mock(MockScheduleSource),
}

impl ScheduleSource for ScheduleBackend {
    async fn fetch(
        &self,
        line: LineCode,
        station: StationCode,
    ) -> Result<StationBoard, ScheduleError> {
        match self {
            ScheduleBackend::Live(client) => client.get_schedule(line, station).await,
            ScheduleBackend::Mock(mock) => mock.get_schedule(line, station).await,
        }
    }
}
