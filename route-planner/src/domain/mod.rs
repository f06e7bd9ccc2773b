//! Domain types for the route planner.
//!
//! Codes and coordinates are validated at construction time, so code that
//! receives these types can trust their validity.

mod coord;
mod line;
mod station;
mod stop;

pub use coord::Coord;
pub use line::{InvalidLineCode, LineCode};
pub use station::{InvalidStationCode, StationCode};
pub use stop::{Direction, Operator, RouteKey, Stop, StopId};
