//! Web layer for the route planner.
//!
//! Provides HTTP endpoints for rail routes with live schedules, multi-modal
//! journeys and nearby discovery.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
