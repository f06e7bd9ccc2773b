//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::compose::{Composer, ItineraryOrder, PlanError, attach_schedules, sort_itineraries};
use crate::domain::{Coord, StationCode};
use crate::planner::RailPlanner;
use crate::schedule::collect;
use crate::spatial::{nearby, sort_by_distance};

use super::dto::*;
use super::state::AppState;

const DEFAULT_ITINERARY_LIMIT: usize = 10;
const MAX_ITINERARY_LIMIT: usize = 50;
const DEFAULT_NEARBY_RADIUS_M: f64 = 500.0;
const MAX_NEARBY_RADIUS_M: f64 = 5000.0;
const MAX_NEARBY_STOPS: usize = 50;

/// Create the application router.
///
/// When `static_dir` is set its contents are served under `/static`.
pub fn create_router(state: AppState, static_dir: Option<&str>) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/fetch_schedule", post(fetch_schedule))
        .route("/journey/plan", post(plan_journey))
        .route("/api/nearby", get(nearby_places));

    let router = match static_dir {
        Some(dir) => router.nest_service("/static", ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn station_field(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Best rail route, alternatives and live schedules for their boardings.
async fn fetch_schedule(
    State(state): State<AppState>,
    Json(req): Json<FetchScheduleRequest>,
) -> Json<FetchScheduleResponse> {
    let (Some(current), Some(destination)) = (
        station_field(req.current_station.as_deref()),
        station_field(req.destination_station.as_deref()),
    ) else {
        warn!("fetch_schedule without both stations");
        return Json(FetchScheduleResponse::error(
            "Please select both a current station and a destination station.",
        ));
    };

    let (Ok(origin), Ok(dest)) = (
        StationCode::parse_normalized(current),
        StationCode::parse_normalized(destination),
    ) else {
        return Json(FetchScheduleResponse::error("No valid route found."));
    };

    let planner = RailPlanner::new(&state.network, &state.search);
    let plan = match planner.plan(origin, dest) {
        Ok(plan) => plan,
        Err(e) => {
            info!(error = %e, "no rail route");
            return Json(FetchScheduleResponse::error("No valid route found."));
        }
    };

    let schedules = collect(state.schedules.as_ref(), &state.network, &plan.boardings()).await;

    Json(FetchScheduleResponse {
        error: None,
        schedules: Some(schedules_result(&schedules)),
        best_route: Some(CandidateResult::from_candidate(&plan.best, &state.network)),
        alternative_routes: Some(
            plan.alternatives
                .iter()
                .map(|c| CandidateResult::from_candidate(c, &state.network))
                .collect(),
        ),
        current_station: Some(origin.to_string()),
        destination_station: Some(dest.to_string()),
    })
}

/// Plan a multi-modal journey between two tagged endpoints.
async fn plan_journey(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanJourneyResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanJourneyRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid journey request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let origin = req
        .origin
        .to_endpoint()
        .map_err(|message| AppError::BadRequest { message })?;
    let destination = req
        .destination
        .to_endpoint()
        .map_err(|message| AppError::BadRequest { message })?;
    let order = match req.sort.as_deref() {
        None => ItineraryOrder::default(),
        Some(s) => ItineraryOrder::parse(s).ok_or_else(|| AppError::BadRequest {
            message: format!("Unknown sort order: {s}"),
        })?,
    };
    let limit = match req.limit {
        None => DEFAULT_ITINERARY_LIMIT,
        Some(0) => {
            return Err(AppError::BadRequest {
                message: "limit must be at least 1".to_string(),
            });
        }
        Some(n) => n.min(MAX_ITINERARY_LIMIT),
    };

    let catalog = state.catalog.current().await;
    let composer = Composer::new(&state.network, &catalog, &state.search, &state.composer);
    let mut itineraries = composer.compose(&origin, &destination)?;

    sort_itineraries(&mut itineraries, order);
    itineraries.truncate(limit);
    attach_schedules(state.schedules.as_ref(), &state.network, &mut itineraries).await;

    Ok(Json(PlanJourneyResponse {
        error: None,
        itineraries: itineraries
            .iter()
            .map(|i| ItineraryResult::from_itinerary(i, &state.network))
            .collect(),
    }))
}

/// Stations and stops around a point, nearest first.
async fn nearby_places(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<NearbyResponse>, AppError> {
    let point = Coord::new(query.lat, query.lon).ok_or_else(|| AppError::BadRequest {
        message: format!("Invalid coordinate: {}, {}", query.lat, query.lon),
    })?;
    let radius = query.radius.unwrap_or(DEFAULT_NEARBY_RADIUS_M);
    if radius.is_nan() || radius <= 0.0 {
        return Err(AppError::BadRequest {
            message: format!("Invalid radius: {radius}"),
        });
    }
    let radius = radius.min(MAX_NEARBY_RADIUS_M);

    let mut stations = nearby(point, state.network.stations(), radius);
    sort_by_distance(&mut stations);
    let stations = stations
        .into_iter()
        .filter_map(|m| {
            let (code, info) = m.item;
            let coord = info.coord?;
            Some(NearbyStation {
                code: code.to_string(),
                name: info.name.clone(),
                lat: coord.lat(),
                lon: coord.lon(),
                distance_m: m.distance_m,
            })
        })
        .collect();

    let catalog = state.catalog.current().await;
    let mut stops = nearby(point, catalog.all_stops(), radius);
    sort_by_distance(&mut stops);
    let stops = stops
        .into_iter()
        .take(MAX_NEARBY_STOPS)
        .filter_map(|m| {
            let coord = m.item.coord?;
            Some(NearbyStop {
                operator: m.item.operator,
                id: m.item.id.to_string(),
                name: m.item.name.clone(),
                lat: coord.lat(),
                lon: coord.lon(),
                distance_m: m.distance_m,
            })
        })
        .collect();

    Ok(Json(NearbyResponse { stations, stops }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::Input(e) => AppError::BadRequest {
                message: e.to_string(),
            },
            PlanError::NoRoute => AppError::NotFound {
                message: "No valid route found.".to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(status = %status, message = %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
