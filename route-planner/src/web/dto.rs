//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::compose::{BusLeg, Endpoint, Itinerary, Legs, RailLeg, StopMatch};
use crate::domain::{Operator, StationCode};
use crate::network::RailNetwork;
use crate::planner::CandidateRailRoute;
use crate::schedule::{LineSchedule, ScheduleEntry, SchedulesByLine};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Request for a rail route and live schedules.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchScheduleRequest {
    pub current_station: Option<String>,
    pub destination_station: Option<String>,
}

/// Response for `/fetch_schedule`. Route fields are null when `error` is set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchScheduleResponse {
    pub error: Option<String>,
    pub schedules: Option<BTreeMap<String, LineScheduleResult>>,
    pub best_route: Option<CandidateResult>,
    pub alternative_routes: Option<Vec<CandidateResult>>,
    pub current_station: Option<String>,
    pub destination_station: Option<String>,
}

impl FetchScheduleResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            schedules: None,
            best_route: None,
            alternative_routes: None,
            current_station: None,
            destination_station: None,
        }
    }
}

/// A candidate rail route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResult {
    /// Line codes in riding order
    pub route: Vec<String>,
    pub boarding_stations: Vec<String>,
    /// Stations where a line is left, ending with the destination
    pub interchanges: Vec<String>,
    pub interchange_count: usize,
    pub stations_passed: usize,
    pub travel_time: u32,
    /// Terminus of each line in the direction ridden, branches joined by `/`
    pub towards: Vec<String>,
}

impl CandidateResult {
    pub fn from_candidate(candidate: &CandidateRailRoute, network: &RailNetwork) -> Self {
        let towards = candidate
            .boardings()
            .zip(&candidate.interchanges)
            .map(|((line, board), &alight)| {
                network
                    .line(line)
                    .and_then(|l| l.towards(board, alight))
                    .map(|t| {
                        t.stations()
                            .iter()
                            .map(|s| s.as_str())
                            .collect::<Vec<_>>()
                            .join("/")
                    })
                    .unwrap_or_default()
            })
            .collect();

        Self {
            route: candidate.lines.iter().map(|l| l.to_string()).collect(),
            boarding_stations: codes(&candidate.boarding_stations),
            interchanges: codes(&candidate.interchanges),
            interchange_count: candidate.interchange_count,
            stations_passed: candidate.stations_passed,
            travel_time: candidate.travel_time,
            towards,
        }
    }
}

fn codes(stations: &[StationCode]) -> Vec<String> {
    stations.iter().map(|s| s.to_string()).collect()
}

/// One upcoming departure.
#[derive(Debug, Serialize)]
pub struct DepartureResult {
    pub time: String,
    pub plat: Option<String>,
    pub dest: Option<String>,
    pub seq: Option<u32>,
    /// Minutes until arrival
    pub ttnt: Option<u32>,
    pub valid: bool,
}

impl DepartureResult {
    pub fn from_entry(entry: &ScheduleEntry) -> Self {
        Self {
            time: entry.time.format(TIME_FORMAT).to_string(),
            plat: entry.platform.clone(),
            dest: entry.destination.clone(),
            seq: entry.sequence,
            ttnt: entry.minutes_away,
            valid: entry.valid,
        }
    }
}

/// Schedule record for one line. Missing times are `-`.
#[derive(Debug, Serialize)]
pub struct LineScheduleResult {
    pub curr_time: String,
    pub sys_time: String,
    pub up: Vec<DepartureResult>,
    pub down: Vec<DepartureResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LineScheduleResult {
    pub fn from_schedule(schedule: &LineSchedule) -> Self {
        let stamp = |t: Option<chrono::NaiveDateTime>| {
            t.map(|t| t.format(TIME_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string())
        };
        Self {
            curr_time: stamp(schedule.current_time),
            sys_time: stamp(schedule.system_time),
            up: schedule.up.iter().map(DepartureResult::from_entry).collect(),
            down: schedule.down.iter().map(DepartureResult::from_entry).collect(),
            message: schedule.message.clone(),
        }
    }
}

/// Schedules keyed by line code.
pub fn schedules_result(schedules: &SchedulesByLine) -> BTreeMap<String, LineScheduleResult> {
    schedules
        .iter()
        .map(|(line, s)| (line.to_string(), LineScheduleResult::from_schedule(s)))
        .collect()
}

/// A journey endpoint as sent by clients.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EndpointRequest {
    Rail { station: String },
    Bus { operator: String, stop: String },
}

impl EndpointRequest {
    pub fn to_endpoint(&self) -> Result<Endpoint, String> {
        match self {
            EndpointRequest::Rail { station } => StationCode::parse_normalized(station)
                .map(Endpoint::Rail)
                .map_err(|_| format!("Invalid station code: {station}")),
            EndpointRequest::Bus { operator, stop } => {
                let operator = Operator::parse(operator)
                    .ok_or_else(|| format!("Unknown operator: {operator}"))?;
                if stop.trim().is_empty() {
                    return Err("Missing stop id".to_string());
                }
                Ok(Endpoint::bus(operator, stop.trim()))
            }
        }
    }
}

/// Request to plan a multi-modal journey.
#[derive(Debug, Deserialize)]
pub struct PlanJourneyRequest {
    pub origin: EndpointRequest,
    pub destination: EndpointRequest,

    /// `duration` (default) or `walking`
    pub sort: Option<String>,

    /// Maximum itineraries returned
    pub limit: Option<usize>,
}

/// Response for journey planning.
#[derive(Debug, Serialize)]
pub struct PlanJourneyResponse {
    pub error: Option<String>,
    pub itineraries: Vec<ItineraryResult>,
}

/// A composed itinerary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResult {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub estimated_minutes: u32,
    pub walking_distance_m: f64,
    /// Legs in travel order
    pub legs: Vec<LegResult>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum LegResult {
    Rail(RailLegResult),
    Bus(BusLegResult),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RailLegResult {
    pub from: StationResult,
    pub to: StationResult,
    pub best_route: CandidateResult,
    pub alternative_routes: Vec<CandidateResult>,
    pub schedules: Option<BTreeMap<String, LineScheduleResult>>,
}

#[derive(Debug, Serialize)]
pub struct StationResult {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusLegResult {
    pub operator: Operator,
    pub route: String,
    pub direction: String,
    pub boarding: StopResult,
    pub alighting: StopResult,
    pub stop_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopResult {
    pub id: String,
    pub name: String,
    /// Walk to (boarding) or from (alighting) this stop, in metres
    pub walk_m: f64,
}

impl ItineraryResult {
    pub fn from_itinerary(itinerary: &Itinerary, network: &RailNetwork) -> Self {
        let rail = |leg: &RailLeg| LegResult::Rail(RailLegResult::from_leg(leg, network));
        let bus = |leg: &BusLeg| LegResult::Bus(BusLegResult::from_leg(leg));

        let legs = match &itinerary.legs {
            Legs::Rail { rail: r } => vec![rail(r)],
            Legs::Surface { bus: b } => vec![bus(b)],
            Legs::SurfaceToRail { bus: b, rail: r } => vec![bus(b), rail(r)],
            Legs::RailToSurface { rail: r, bus: b } => vec![rail(r), bus(b)],
            Legs::RailToSurfaceWithInterchange {
                rail: r,
                first,
                second,
            } => vec![rail(r), bus(first), bus(second)],
            Legs::SurfaceRailSurface {
                first,
                rail: r,
                second,
            }
            | Legs::CrossOperator {
                first,
                rail: r,
                second,
            } => vec![bus(first), rail(r), bus(second)],
        };

        Self {
            kind: itinerary.kind().as_str(),
            estimated_minutes: itinerary.estimated_minutes,
            walking_distance_m: itinerary.walking_m,
            legs,
        }
    }
}

impl RailLegResult {
    pub fn from_leg(leg: &RailLeg, network: &RailNetwork) -> Self {
        Self {
            from: StationResult::new(leg.from, network),
            to: StationResult::new(leg.to, network),
            best_route: CandidateResult::from_candidate(&leg.plan.best, network),
            alternative_routes: leg
                .plan
                .alternatives
                .iter()
                .map(|c| CandidateResult::from_candidate(c, network))
                .collect(),
            schedules: leg.schedules.as_ref().map(schedules_result),
        }
    }
}

impl StationResult {
    pub fn new(code: StationCode, network: &RailNetwork) -> Self {
        Self {
            code: code.to_string(),
            name: network
                .station_name(code)
                .map(str::to_string)
                .unwrap_or_else(|| code.to_string()),
        }
    }
}

impl BusLegResult {
    pub fn from_leg(leg: &BusLeg) -> Self {
        Self {
            operator: leg.operator,
            route: leg.route.clone(),
            direction: leg.direction.as_str().to_string(),
            boarding: StopResult::from_match(&leg.boarding),
            alighting: StopResult::from_match(&leg.alighting),
            stop_count: leg.stop_count,
        }
    }
}

impl StopResult {
    fn from_match(stop: &StopMatch) -> Self {
        Self {
            id: stop.id.to_string(),
            name: stop.name.clone(),
            walk_m: stop.walk_m,
        }
    }
}

/// Query for stations and stops around a point.
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,
    /// Metres, default 500
    pub radius: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub stations: Vec<NearbyStation>,
    pub stops: Vec<NearbyStop>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyStation {
    pub code: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub distance_m: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyStop {
    pub operator: Operator,
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub distance_m: f64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
