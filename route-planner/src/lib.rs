//! Hong Kong route planner server.
//!
//! Plans rail journeys across the MTR with an interchange-aware search and
//! composes multi-modal itineraries with KMB and Citybus legs.

pub mod catalog;
pub mod compose;
pub mod domain;
pub mod network;
pub mod planner;
pub mod schedule;
pub mod spatial;
pub mod web;
