use crate::domain::{Operator, StationCode, StopId};

/// An endpoint that cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown station {0}")]
    UnknownStation(StationCode),

    #[error("unknown {operator} stop {stop}")]
    UnknownStop { operator: Operator, stop: StopId },
}

/// Errors from itinerary composition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("no itinerary found")]
    NoRoute,
}
