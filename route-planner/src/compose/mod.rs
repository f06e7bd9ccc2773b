//! Multi-modal itinerary composition.
//!
//! Rail routes come from [`crate::planner`]; bus legs are discovered by
//! matching catalogue stops against walking radii around each endpoint and
//! each candidate station.

mod composer;
mod config;
mod error;
mod itinerary;
mod matching;
mod schedules;

#[cfg(test)]
mod composer_tests;

pub use composer::Composer;
pub use config::ComposerConfig;
pub use error::{InputError, PlanError};
pub use itinerary::{
    BusLeg, Endpoint, Itinerary, ItineraryKind, ItineraryOrder, Legs, RailLeg, StopMatch,
    sort_itineraries,
};
pub use matching::match_bus_legs;
pub use schedules::attach_schedules;
