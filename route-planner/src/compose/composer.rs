//! Itinerary composition for each origin/destination pairing.

use tracing::debug;

use crate::catalog::SurfaceCatalog;
use crate::domain::{Coord, Operator, StationCode, Stop};
use crate::network::RailNetwork;
use crate::planner::{RailPlanner, SearchConfig};
use crate::spatial::{Nearest, nearby, nearest_n};

use super::ComposerConfig;
use super::error::{InputError, PlanError};
use super::itinerary::{BusLeg, Endpoint, Itinerary, Legs, RailLeg};
use super::matching::{bus_leg, closest_in, feeders, match_bus_legs, stops_near};

enum Resolved<'c> {
    Rail(StationCode),
    Bus(&'c Stop),
}

/// Builds itineraries over a rail network and a bus catalogue.
pub struct Composer<'a> {
    network: &'a RailNetwork,
    catalog: &'a SurfaceCatalog,
    search: &'a SearchConfig,
    config: &'a ComposerConfig,
}

impl<'a> Composer<'a> {
    pub fn new(
        network: &'a RailNetwork,
        catalog: &'a SurfaceCatalog,
        search: &'a SearchConfig,
        config: &'a ComposerConfig,
    ) -> Self {
        Self {
            network,
            catalog,
            search,
            config,
        }
    }

    /// Every itinerary for the pairing, in discovery order.
    ///
    /// | origin | destination | variants |
    /// |--------|-------------|----------|
    /// | rail | rail | `Rail` |
    /// | bus | rail | `SurfaceToRail` |
    /// | rail | bus | `RailToSurface`, else `RailToSurfaceWithInterchange` |
    /// | bus | bus | `Surface`, then `SurfaceRailSurface` or `CrossOperator` |
    pub fn compose(
        &self,
        origin: &Endpoint,
        destination: &Endpoint,
    ) -> Result<Vec<Itinerary>, PlanError> {
        let from = self.resolve(origin)?;
        let to = self.resolve(destination)?;

        let itineraries = match (from, to) {
            (Resolved::Rail(a), Resolved::Rail(b)) => self.rail_only(a, b).into_iter().collect(),
            (Resolved::Bus(a), Resolved::Rail(b)) => self.surface_to_rail(a, b),
            (Resolved::Rail(a), Resolved::Bus(b)) => self.rail_to_surface(a, b),
            (Resolved::Bus(a), Resolved::Bus(b)) => {
                let mut found = self.surface(a, b);
                found.extend(self.surface_rail_surface(a, b));
                found
            }
        };

        debug!(
            origin = ?origin,
            destination = ?destination,
            found = itineraries.len(),
            "composition complete"
        );

        if itineraries.is_empty() {
            return Err(PlanError::NoRoute);
        }
        Ok(itineraries)
    }

    fn resolve(&self, endpoint: &Endpoint) -> Result<Resolved<'a>, InputError> {
        match endpoint {
            Endpoint::Rail(code) => {
                if self.network.contains_station(*code) {
                    Ok(Resolved::Rail(*code))
                } else {
                    Err(InputError::UnknownStation(*code))
                }
            }
            Endpoint::Bus { operator, stop } => self
                .catalog
                .stop(*operator, stop)
                .map(Resolved::Bus)
                .ok_or_else(|| InputError::UnknownStop {
                    operator: *operator,
                    stop: stop.clone(),
                }),
        }
    }

    fn itinerary(&self, legs: Legs) -> Itinerary {
        Itinerary::new(legs, self.search, self.config)
    }

    fn rail_leg(&self, from: StationCode, to: StationCode) -> Option<RailLeg> {
        match RailPlanner::new(self.network, self.search).plan(from, to) {
            Ok(plan) => Some(RailLeg::new(from, to, plan)),
            Err(e) => {
                debug!(error = %e, "candidate station discarded");
                None
            }
        }
    }

    /// The configured number of stations nearest `point`.
    fn candidate_stations(&self, point: Coord) -> Vec<(StationCode, Coord)> {
        nearest_n(point, self.network.stations(), self.config.candidate_stations)
            .into_iter()
            .filter_map(|Nearest { item: (code, info), .. }| Some((code, info.coord?)))
            .collect()
    }

    /// Direct bus legs, trying the wider radius only when the first attempt
    /// finds nothing.
    fn direct_buses(&self, operators: &[Operator], from: Coord, to: Coord) -> Vec<BusLeg> {
        let attempt = |radius_m: f64| -> Vec<BusLeg> {
            operators
                .iter()
                .flat_map(|&op| match_bus_legs(self.catalog, op, from, to, radius_m))
                .collect()
        };
        let legs = attempt(self.config.interchange_radius_m);
        if !legs.is_empty() {
            return legs;
        }
        attempt(self.config.direct_radius_m)
    }

    /// The leg with the smallest ride plus walk time. Earlier legs win ties.
    fn quickest(&self, legs: Vec<BusLeg>) -> Option<BusLeg> {
        legs.into_iter().min_by_key(|leg| {
            leg.ride_minutes(self.config) + self.config.walking_minutes(leg.walking_m())
        })
    }

    pub fn rail_only(&self, origin: StationCode, destination: StationCode) -> Option<Itinerary> {
        let rail = self.rail_leg(origin, destination)?;
        Some(self.itinerary(Legs::Rail { rail }))
    }

    /// A bus from the origin stop to a nearby station, then rail.
    pub fn surface_to_rail(&self, origin: &Stop, destination: StationCode) -> Vec<Itinerary> {
        let Some(from) = origin.coord else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for (station, coord) in self.candidate_stations(from) {
            if station == destination {
                continue;
            }
            let Some(rail) = self.rail_leg(station, destination) else {
                continue;
            };
            let buses = match_bus_legs(
                self.catalog,
                origin.operator,
                from,
                coord,
                self.config.interchange_radius_m,
            );
            for bus in buses {
                out.push(self.itinerary(Legs::SurfaceToRail {
                    bus,
                    rail: rail.clone(),
                }));
            }
        }
        out
    }

    /// Rail to a station near the destination stop, then one bus, or two
    /// buses when no single route connects.
    pub fn rail_to_surface(&self, origin: StationCode, destination: &Stop) -> Vec<Itinerary> {
        let Some(to) = destination.coord else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for (station, coord) in self.candidate_stations(to) {
            if station == origin {
                continue;
            }
            let Some(rail) = self.rail_leg(origin, station) else {
                continue;
            };

            let buses = self.direct_buses(&[destination.operator], coord, to);
            if buses.is_empty() {
                out.extend(self.with_bus_interchange(&rail, coord, destination));
                continue;
            }
            for bus in buses {
                out.push(self.itinerary(Legs::RailToSurface {
                    rail: rail.clone(),
                    bus,
                }));
            }
        }
        out
    }

    /// Bus A from near `station` to a transfer stop, a short walk, then bus B
    /// on the destination's operator.
    fn with_bus_interchange(
        &self,
        rail: &RailLeg,
        station: Coord,
        destination: &Stop,
    ) -> Vec<Itinerary> {
        let Some(to) = destination.coord else {
            return Vec::new();
        };
        let radius = self.config.interchange_radius_m;
        let limit = self.config.max_transfer_itineraries;

        let onward = feeders(self.catalog, destination.operator, to, radius);
        let mut out = Vec::new();
        if onward.is_empty() || limit == 0 {
            return out;
        }

        for operator in Operator::ALL {
            let near_station = stops_near(self.catalog, operator, station, radius);
            if near_station.is_empty() {
                continue;
            }
            for (key, sequence) in self.catalog.route_sequences(operator) {
                let Some(boarding) = closest_in(sequence, 0, &near_station) else {
                    continue;
                };
                for transfer_at in boarding.0 + 1..sequence.len() {
                    let Some(point) = self
                        .catalog
                        .stop(operator, &sequence[transfer_at])
                        .and_then(|s| s.coord)
                    else {
                        continue;
                    };

                    let next_stops =
                        nearby(point, self.catalog.stops_of(destination.operator), radius);
                    for Nearest {
                        item: next,
                        distance_m: walk_m,
                    } in next_stops
                    {
                        let Some(routes) = onward.get(&next.id) else {
                            continue;
                        };
                        for feeder in routes {
                            if operator == destination.operator && feeder.key == key {
                                continue;
                            }
                            let first = bus_leg(
                                self.catalog,
                                operator,
                                &key,
                                sequence,
                                boarding,
                                (transfer_at, 0.0),
                            );
                            let second = bus_leg(
                                self.catalog,
                                destination.operator,
                                &feeder.key,
                                feeder.sequence,
                                (feeder.boarding, walk_m),
                                feeder.alighting,
                            );
                            out.push(self.itinerary(Legs::RailToSurfaceWithInterchange {
                                rail: rail.clone(),
                                first,
                                second,
                            }));
                            if out.len() >= limit {
                                return out;
                            }
                        }
                    }
                }
            }
        }
        out
    }

    /// A single bus between two stops, on any operator.
    pub fn surface(&self, origin: &Stop, destination: &Stop) -> Vec<Itinerary> {
        let (Some(from), Some(to)) = (origin.coord, destination.coord) else {
            return Vec::new();
        };
        self.direct_buses(&Operator::ALL, from, to)
            .into_iter()
            .map(|bus| self.itinerary(Legs::Surface { bus }))
            .collect()
    }

    /// Bus to a station near the origin, rail, bus from a station near the
    /// destination. Each bus runs on its own stop's operator; the variant is
    /// `CrossOperator` when those differ.
    pub fn surface_rail_surface(&self, origin: &Stop, destination: &Stop) -> Vec<Itinerary> {
        let (Some(from), Some(to)) = (origin.coord, destination.coord) else {
            return Vec::new();
        };
        let radius = self.config.interchange_radius_m;
        let cross = origin.operator != destination.operator;

        let ends: Vec<(StationCode, BusLeg)> = self
            .candidate_stations(to)
            .into_iter()
            .filter_map(|(station, coord)| {
                let legs = match_bus_legs(self.catalog, destination.operator, coord, to, radius);
                Some((station, self.quickest(legs)?))
            })
            .collect();
        if ends.is_empty() {
            return Vec::new();
        }

        let mut out = Vec::new();
        for (start, coord) in self.candidate_stations(from) {
            let legs = match_bus_legs(self.catalog, origin.operator, from, coord, radius);
            let Some(first) = self.quickest(legs) else {
                continue;
            };
            for (end, second) in &ends {
                if start == *end {
                    continue;
                }
                let Some(rail) = self.rail_leg(start, *end) else {
                    continue;
                };
                let first = first.clone();
                let second = second.clone();
                let legs = if cross {
                    Legs::CrossOperator {
                        first,
                        rail,
                        second,
                    }
                } else {
                    Legs::SurfaceRailSurface {
                        first,
                        rail,
                        second,
                    }
                };
                out.push(self.itinerary(legs));
            }
        }
        out
    }
}
