//! Interchange-aware depth-first search over rail lines.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::SearchConfig;
use super::rank::{RoutePlan, rank_candidates, split_best};
use crate::domain::{LineCode, StationCode};
use crate::network::{Hops, Line, RailNetwork, stations_between};

/// Errors that can occur during rail route search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no rail route from {origin} to {destination}")]
    NoRoute {
        origin: StationCode,
        destination: StationCode,
    },
}

/// One way of reaching the destination by rail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRailRoute {
    /// Lines ridden, in order. No line appears twice.
    pub lines: Vec<LineCode>,
    /// Station where each line in `lines` is boarded.
    pub boarding_stations: Vec<StationCode>,
    /// Stations where a line is left, ending with the destination.
    pub interchanges: Vec<StationCode>,
    pub interchange_count: usize,
    pub stations_passed: usize,
    /// `stations_passed + interchange_penalty * interchange_count`.
    pub travel_time: u32,
}

impl CandidateRailRoute {
    /// Each line paired with the station it is boarded at.
    pub fn boardings(&self) -> impl Iterator<Item = (LineCode, StationCode)> + '_ {
        self.lines
            .iter()
            .copied()
            .zip(self.boarding_stations.iter().copied())
    }

    /// Estimated ride duration in minutes.
    pub fn estimated_minutes(&self, config: &SearchConfig) -> u32 {
        self.stations_passed as u32 * config.minutes_per_station
            + self.interchange_count as u32 * config.interchange_penalty
    }
}

/// Rail route planner over an injected network.
pub struct RailPlanner<'a> {
    network: &'a RailNetwork,
    config: &'a SearchConfig,
}

impl<'a> RailPlanner<'a> {
    pub fn new(network: &'a RailNetwork, config: &'a SearchConfig) -> Self {
        Self { network, config }
    }

    pub fn network(&self) -> &'a RailNetwork {
        self.network
    }

    pub fn config(&self) -> &'a SearchConfig {
        self.config
    }

    /// Ranked candidates, best first, at most `max_candidates`.
    ///
    /// Empty when the origin is on no line or the destination cannot be
    /// reached within the interchange budget.
    pub fn candidates(
        &self,
        origin: StationCode,
        destination: StationCode,
    ) -> Vec<CandidateRailRoute> {
        let mut search = Search {
            network: self.network,
            destination,
            max_interchanges: self.config.max_interchanges,
            interchange_penalty: self.config.interchange_penalty,
            route: Vec::new(),
            boarding: vec![origin],
            interchanges: Vec::new(),
            path: Vec::new(),
            visited: HashSet::new(),
            found: Vec::new(),
        };

        for line in self.network.lines_serving(origin) {
            search.visit(line, origin, 0, 0);
        }

        debug!(
            origin = %origin,
            destination = %destination,
            found = search.found.len(),
            "rail search complete"
        );

        rank_candidates(search.found, self.config.max_candidates)
    }

    /// Best route plus alternatives.
    pub fn plan(
        &self,
        origin: StationCode,
        destination: StationCode,
    ) -> Result<RoutePlan, SearchError> {
        let ranked = self.candidates(origin, destination);
        split_best(ranked, self.config.max_alternatives)
            .ok_or(SearchError::NoRoute { origin, destination })
    }
}

/// Mutable traversal state. Every push on entry is popped on exit, so each
/// branch only sees markers from its own path.
struct Search<'n> {
    network: &'n RailNetwork,
    destination: StationCode,
    max_interchanges: usize,
    interchange_penalty: u32,
    route: Vec<LineCode>,
    boarding: Vec<StationCode>,
    interchanges: Vec<StationCode>,
    path: Vec<StationCode>,
    visited: HashSet<(LineCode, StationCode)>,
    found: Vec<CandidateRailRoute>,
}

impl Search<'_> {
    fn visit(&mut self, line: &Line, station: StationCode, changes: usize, passed: usize) {
        if self.path.contains(&station) {
            return;
        }
        if !self.visited.insert((line.code(), station)) {
            return;
        }
        self.path.push(station);

        self.expand(line, station, changes, passed);

        self.path.pop();
        self.visited.remove(&(line.code(), station));
    }

    fn expand(&mut self, line: &Line, station: StationCode, changes: usize, passed: usize) {
        if let Hops::Reachable(hops) = stations_between(line, station, self.destination) {
            self.emit(line.code(), changes, passed + hops);
            return;
        }

        if changes >= self.max_interchanges {
            return;
        }

        let network = self.network;
        for interchange in network.interchanges() {
            let at = interchange.station();
            let Some(hops) = stations_between(line, station, at).count() else {
                continue;
            };

            for &next in interchange.lines() {
                if next == line.code() || self.route.contains(&next) {
                    continue;
                }
                let Some(next_line) = network.line(next) else {
                    continue;
                };

                self.route.push(line.code());
                self.interchanges.push(at);
                self.boarding.push(at);

                self.visit(next_line, at, changes + 1, passed + hops);

                self.boarding.pop();
                self.interchanges.pop();
                self.route.pop();
            }
        }
    }

    fn emit(&mut self, last_line: LineCode, changes: usize, passed: usize) {
        let mut lines = self.route.clone();
        lines.push(last_line);
        let mut interchanges = self.interchanges.clone();
        interchanges.push(self.destination);

        let travel_time = passed as u32 + self.interchange_penalty * changes as u32;
        trace!(lines = ?lines, passed, changes, travel_time, "candidate found");

        self.found.push(CandidateRailRoute {
            lines,
            boarding_stations: self.boarding.clone(),
            interchanges,
            interchange_count: changes,
            stations_passed: passed,
            travel_time,
        });
    }
}
