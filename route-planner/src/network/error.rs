use thiserror::Error;

use crate::domain::{InvalidLineCode, InvalidStationCode, LineCode, StationCode};

/// Errors raised while assembling a rail network.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error(transparent)]
    LineCode(#[from] InvalidLineCode),

    #[error(transparent)]
    StationCode(#[from] InvalidStationCode),

    #[error("line {0} declared twice")]
    DuplicateLine(LineCode),

    #[error("line {0} has no stations")]
    EmptyLine(LineCode),

    #[error("line {line} visits {station} more than once")]
    RepeatedStation { line: LineCode, station: StationCode },

    #[error("interchange {station} names unknown line {line}")]
    UnknownInterchangeLine { station: StationCode, line: LineCode },
}
