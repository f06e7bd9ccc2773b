//! Rail route planner.
//!
//! Enumerates candidate rail routes between two stations with a depth-first
//! search rooted at every line serving the origin. Routes change line only at
//! interchanges, never ride a line twice and never revisit a station. Results
//! are scored by stations passed plus a fixed penalty per interchange.

mod config;
mod rank;
mod search;


pub use config::SearchConfig;
pub use rank::{RoutePlan, rank_candidates, split_best};
pub use search::{CandidateRailRoute, RailPlanner, SearchError};
