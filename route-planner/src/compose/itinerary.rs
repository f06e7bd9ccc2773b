//! Itinerary legs and totals.

use crate::domain::{Direction, Operator, StationCode, StopId};
use crate::planner::{RoutePlan, SearchConfig};
use crate::schedule::SchedulesByLine;

use super::ComposerConfig;

/// Where a journey starts or ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Rail(StationCode),
    Bus { operator: Operator, stop: StopId },
}

impl Endpoint {
    pub fn bus(operator: Operator, stop: impl Into<String>) -> Self {
        Endpoint::Bus {
            operator,
            stop: StopId::new(stop),
        }
    }
}

/// A bus stop chosen for boarding or alighting, with the walk to reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct StopMatch {
    pub id: StopId,
    pub name: String,
    /// Position in the route-direction sequence.
    pub index: usize,
    /// Walk between this stop and the point it was matched against (metres).
    pub walk_m: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BusLeg {
    pub operator: Operator,
    pub route: String,
    pub direction: Direction,
    pub boarding: StopMatch,
    pub alighting: StopMatch,
    pub stop_count: usize,
}

impl BusLeg {
    pub fn walking_m(&self) -> f64 {
        self.boarding.walk_m + self.alighting.walk_m
    }

    pub fn ride_minutes(&self, config: &ComposerConfig) -> u32 {
        self.stop_count as u32 * config.minutes_per_stop
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RailLeg {
    pub from: StationCode,
    pub to: StationCode,
    pub plan: RoutePlan,
    /// Filled by [`attach_schedules`](super::attach_schedules).
    pub schedules: Option<SchedulesByLine>,
}

impl RailLeg {
    pub fn new(from: StationCode, to: StationCode, plan: RoutePlan) -> Self {
        Self {
            from,
            to,
            plan,
            schedules: None,
        }
    }

    pub fn ride_minutes(&self, config: &SearchConfig) -> u32 {
        self.plan.best.estimated_minutes(config)
    }
}

/// The legs of one itinerary.
#[derive(Debug, Clone, PartialEq)]
pub enum Legs {
    Rail {
        rail: RailLeg,
    },
    Surface {
        bus: BusLeg,
    },
    SurfaceToRail {
        bus: BusLeg,
        rail: RailLeg,
    },
    RailToSurface {
        rail: RailLeg,
        bus: BusLeg,
    },
    /// The second bus is boarded a short walk from where the first is left.
    RailToSurfaceWithInterchange {
        rail: RailLeg,
        first: BusLeg,
        second: BusLeg,
    },
    SurfaceRailSurface {
        first: BusLeg,
        rail: RailLeg,
        second: BusLeg,
    },
    /// Like `SurfaceRailSurface` with each bus on a different operator.
    CrossOperator {
        first: BusLeg,
        rail: RailLeg,
        second: BusLeg,
    },
}

/// Variant tag of [`Legs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItineraryKind {
    Rail,
    Surface,
    SurfaceToRail,
    RailToSurface,
    RailToSurfaceWithInterchange,
    SurfaceRailSurface,
    CrossOperator,
}

impl ItineraryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItineraryKind::Rail => "rail",
            ItineraryKind::Surface => "surface",
            ItineraryKind::SurfaceToRail => "surface_to_rail",
            ItineraryKind::RailToSurface => "rail_to_surface",
            ItineraryKind::RailToSurfaceWithInterchange => "rail_to_surface_with_interchange",
            ItineraryKind::SurfaceRailSurface => "surface_rail_surface",
            ItineraryKind::CrossOperator => "cross_operator",
        }
    }
}

impl Legs {
    pub fn kind(&self) -> ItineraryKind {
        match self {
            Legs::Rail { .. } => ItineraryKind::Rail,
            Legs::Surface { .. } => ItineraryKind::Surface,
            Legs::SurfaceToRail { .. } => ItineraryKind::SurfaceToRail,
            Legs::RailToSurface { .. } => ItineraryKind::RailToSurface,
            Legs::RailToSurfaceWithInterchange { .. } => {
                ItineraryKind::RailToSurfaceWithInterchange
            }
            Legs::SurfaceRailSurface { .. } => ItineraryKind::SurfaceRailSurface,
            Legs::CrossOperator { .. } => ItineraryKind::CrossOperator,
        }
    }

    pub fn rail(&self) -> Option<&RailLeg> {
        match self {
            Legs::Rail { rail }
            | Legs::SurfaceToRail { rail, .. }
            | Legs::RailToSurface { rail, .. }
            | Legs::RailToSurfaceWithInterchange { rail, .. }
            | Legs::SurfaceRailSurface { rail, .. }
            | Legs::CrossOperator { rail, .. } => Some(rail),
            Legs::Surface { .. } => None,
        }
    }

    pub fn rail_mut(&mut self) -> Option<&mut RailLeg> {
        match self {
            Legs::Rail { rail }
            | Legs::SurfaceToRail { rail, .. }
            | Legs::RailToSurface { rail, .. }
            | Legs::RailToSurfaceWithInterchange { rail, .. }
            | Legs::SurfaceRailSurface { rail, .. }
            | Legs::CrossOperator { rail, .. } => Some(rail),
            Legs::Surface { .. } => None,
        }
    }

    /// Bus legs in travel order.
    pub fn buses(&self) -> Vec<&BusLeg> {
        match self {
            Legs::Rail { .. } => Vec::new(),
            Legs::Surface { bus } | Legs::SurfaceToRail { bus, .. } | Legs::RailToSurface { bus, .. } => {
                vec![bus]
            }
            Legs::RailToSurfaceWithInterchange { first, second, .. }
            | Legs::SurfaceRailSurface { first, second, .. }
            | Legs::CrossOperator { first, second, .. } => vec![first, second],
        }
    }
}

/// A composed journey with its aggregate cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub legs: Legs,
    pub estimated_minutes: u32,
    pub walking_m: f64,
}

impl Itinerary {
    /// Compute totals for `legs`. Walking is summed over every bus leg and
    /// rounded to minutes once.
    pub fn new(legs: Legs, search: &SearchConfig, config: &ComposerConfig) -> Self {
        let rail = legs.rail().map_or(0, |r| r.ride_minutes(search));
        let buses = legs.buses();
        let bus: u32 = buses.iter().map(|b| b.ride_minutes(config)).sum();
        let walking_m: f64 = buses.iter().map(|b| b.walking_m()).sum();

        Self {
            estimated_minutes: rail + bus + config.walking_minutes(walking_m),
            walking_m,
            legs,
        }
    }

    pub fn kind(&self) -> ItineraryKind {
        self.legs.kind()
    }
}

/// Sort key for [`sort_itineraries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItineraryOrder {
    #[default]
    Duration,
    Walking,
}

impl ItineraryOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "duration" => Some(ItineraryOrder::Duration),
            "walking" => Some(ItineraryOrder::Walking),
            _ => None,
        }
    }
}

/// Stable sort, ascending.
pub fn sort_itineraries(itineraries: &mut [Itinerary], order: ItineraryOrder) {
    match order {
        ItineraryOrder::Duration => itineraries.sort_by_key(|i| i.estimated_minutes),
        ItineraryOrder::Walking => {
            itineraries.sort_by(|a, b| a.walking_m.total_cmp(&b.walking_m))
        }
    }
}
