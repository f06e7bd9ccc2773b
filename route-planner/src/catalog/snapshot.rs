//! Catalogue snapshot files.
//!
//! A snapshot is produced by an external fetcher and read here without
//! modification. Its shape is:
//!
//! ```json
//! {
//!   "timestamp": 1700000000000,
//!   "operators": {
//!     "kmb": {
//!       "routes": [{ "route": "1A" }],
//!       "route_stops": { "1A-outbound": ["STOP1", "STOP2"] },
//!       "stops": [{ "stop": "STOP1", "name_en": "Star Ferry", "lat": "22.29", "long": "114.16" }]
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use super::{CatalogBuilder, CatalogError, SurfaceCatalog};
use crate::domain::{Coord, Operator, RouteKey, Stop, StopId};

/// Default snapshot TTL: 24 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Where the snapshot lives and how long it stays fresh.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub path: PathBuf,
    pub ttl: Duration,
}

impl CatalogConfig {
    /// Config with the default TTL (24 hours).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new("static/data/transport_data.json")
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    timestamp: Option<i64>,
    #[serde(default)]
    operators: BTreeMap<String, OperatorFile>,
}

#[derive(Debug, Default, Deserialize)]
struct OperatorFile {
    #[serde(default)]
    routes: Vec<RouteEntry>,
    #[serde(default)]
    route_stops: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    stops: Vec<StopEntry>,
}

#[derive(Debug, Deserialize)]
struct RouteEntry {
    route: String,
}

#[derive(Debug, Deserialize)]
struct StopEntry {
    stop: String,
    #[serde(default)]
    name_en: Option<String>,
    #[serde(default, deserialize_with = "loose_degrees")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "loose_degrees")]
    long: Option<f64>,
}

/// Accept a number, a numeric string, or anything else as "absent".
fn loose_degrees<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Parse a snapshot from JSON text.
pub fn parse_snapshot(json: &str) -> Result<SurfaceCatalog, CatalogError> {
    let file: SnapshotFile = serde_json::from_str(json).map_err(|e| CatalogError::Json {
        message: e.to_string(),
    })?;

    let mut builder = CatalogBuilder::new();
    builder.set_timestamp(file.timestamp.and_then(DateTime::from_timestamp_millis));

    for (key, data) in file.operators {
        let Some(operator) = Operator::parse(&key) else {
            warn!(operator = %key, "unknown operator in catalogue, skipping");
            continue;
        };

        let mut without_coord = 0usize;
        for entry in data.stops {
            let coord = match (entry.lat, entry.long) {
                (Some(lat), Some(lon)) => Coord::new(lat, lon),
                _ => None,
            };
            if coord.is_none() {
                without_coord += 1;
            }
            let name = entry.name_en.unwrap_or_else(|| format!("Stop {}", entry.stop));
            builder.add_stop(Stop {
                id: StopId::new(entry.stop),
                name,
                operator,
                coord,
            });
        }
        if without_coord > 0 {
            debug!(operator = %operator, count = without_coord, "stops without usable coordinates");
        }

        for route in data.routes {
            builder.add_route(operator, &route.route);
        }

        for (key, stops) in data.route_stops {
            let Some(route_key) = RouteKey::parse(&key) else {
                warn!(operator = %operator, key = %key, "unrecognised route key, skipping");
                continue;
            };
            builder.add_route_stops(operator, route_key, stops.into_iter().map(StopId::new).collect());
        }
    }

    Ok(builder.build())
}

/// Read and parse a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<SurfaceCatalog, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_snapshot(&contents)
}

/// Whether a snapshot taken at `timestamp` is older than `ttl` at `now`.
/// Snapshots without a timestamp are never stale.
pub fn is_stale(timestamp: Option<DateTime<Utc>>, ttl: Duration, now: DateTime<Utc>) -> bool {
    let Some(taken) = timestamp else {
        return false;
    };
    let age = now.signed_duration_since(taken);
    match age.to_std() {
        Ok(age) => age >= ttl,
        // Timestamp in the future.
        Err(_) => false,
    }
}
