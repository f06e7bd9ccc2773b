use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use route_planner::catalog::{CatalogConfig, CatalogHandle};
use route_planner::compose::ComposerConfig;
use route_planner::network::hong_kong::mtr_network;
use route_planner::planner::SearchConfig;
use route_planner::schedule::{
    MockScheduleSource, MtrScheduleClient, ScheduleBackend, ScheduleConfig,
};
use route_planner::web::{AppState, create_router};

/// How often to re-read the bus catalogue (24 hours).
const CATALOG_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

const DEFAULT_PORT: u16 = 4000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("route_planner=info,tower_http=info")),
        )
        .init();

    let network = mtr_network().expect("Built-in MTR network is invalid");

    // Bus catalogue: start empty if the snapshot is unavailable
    let catalog_config = match std::env::var("CATALOG_PATH") {
        Ok(path) => CatalogConfig::new(path),
        Err(_) => CatalogConfig::default(),
    };
    let catalog = match CatalogHandle::load(catalog_config.clone()).await {
        Ok(handle) => handle,
        Err(e) => {
            warn!(error = %e, "bus catalogue unavailable, starting without bus stops");
            CatalogHandle::empty(catalog_config)
        }
    };

    // Spawn background task to refresh the catalogue daily
    let catalog_refresh = catalog.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CATALOG_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match catalog_refresh.reload().await {
                Ok(count) => info!(stops = count, "refreshed bus catalogue"),
                Err(e) => warn!(error = %e, "failed to refresh bus catalogue"),
            }
        }
    });

    // Schedule source: recorded boards when MOCK_SCHEDULE_DIR is set
    let schedules = match std::env::var("MOCK_SCHEDULE_DIR") {
        Ok(dir) => {
            let mock = MockScheduleSource::new(&dir).expect("Failed to load mock schedules");
            info!(dir = %dir, boards = mock.len(), "using mock schedules");
            ScheduleBackend::Mock(mock)
        }
        Err(_) => {
            let mut config = ScheduleConfig::new();
            if let Ok(url) = std::env::var("SCHEDULE_BASE_URL") {
                config = config.with_base_url(url);
            }
            let client = MtrScheduleClient::new(config).expect("Failed to create schedule client");
            ScheduleBackend::Live(client)
        }
    };

    let state = AppState::new(
        network,
        catalog,
        schedules,
        SearchConfig::default(),
        ComposerConfig::default(),
    );

    let static_dir = std::env::var("STATIC_DIR").ok();
    let app = create_router(state, static_dir.as_deref());

    let ip = std::env::var("BIND_ADDR")
        .ok()
        .and_then(|s| s.parse::<IpAddr>().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::new(ip, port);

    info!("Route planner listening on http://{addr}");
    info!("  GET  /health          - Health check");
    info!("  POST /fetch_schedule  - Rail route with live schedules");
    info!("  POST /journey/plan    - Multi-modal journey");
    info!("  GET  /api/nearby      - Stations and stops near a point");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
