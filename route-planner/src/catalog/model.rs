use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use crate::domain::{Coord, Direction, Operator, RouteKey, Stop, StopId};

#[derive(Debug, Clone, Default)]
struct OperatorData {
    stops: Vec<Stop>,
    index: HashMap<StopId, usize>,
    routes: Vec<String>,
    route_stops: HashMap<RouteKey, Vec<StopId>>,
}

/// Read-only snapshot of bus stops and route stop sequences.
#[derive(Debug, Clone, Default)]
pub struct SurfaceCatalog {
    operators: BTreeMap<Operator, OperatorData>,
    timestamp: Option<DateTime<Utc>>,
}

impl SurfaceCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// When the snapshot was produced, if recorded.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn stop(&self, operator: Operator, id: &StopId) -> Option<&Stop> {
        let data = self.operators.get(&operator)?;
        data.index.get(id).map(|&i| &data.stops[i])
    }

    /// Stops of one operator, in snapshot order.
    pub fn stops_of(&self, operator: Operator) -> &[Stop] {
        self.operators
            .get(&operator)
            .map(|d| d.stops.as_slice())
            .unwrap_or_default()
    }

    /// Stops of every operator.
    pub fn all_stops(&self) -> impl Iterator<Item = &Stop> + '_ {
        self.operators.values().flat_map(|d| d.stops.iter())
    }

    pub fn stop_count(&self) -> usize {
        self.operators.values().map(|d| d.stops.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_count() == 0
    }

    /// Route names of one operator, in snapshot order.
    pub fn routes(&self, operator: Operator) -> &[String] {
        self.operators
            .get(&operator)
            .map(|d| d.routes.as_slice())
            .unwrap_or_default()
    }

    pub fn stop_sequence(&self, operator: Operator, key: &RouteKey) -> Option<&[StopId]> {
        self.operators
            .get(&operator)?
            .route_stops
            .get(key)
            .map(Vec::as_slice)
    }

    /// Every non-empty stop sequence of one operator: routes in snapshot
    /// order, outbound before inbound.
    pub fn route_sequences(
        &self,
        operator: Operator,
    ) -> impl Iterator<Item = (RouteKey, &[StopId])> + '_ {
        self.routes(operator).iter().flat_map(move |route| {
            [Direction::Outbound, Direction::Inbound]
                .into_iter()
                .filter_map(move |direction| {
                    let key = RouteKey::new(route.as_str(), direction);
                    let stops = self.stop_sequence(operator, &key)?;
                    (!stops.is_empty()).then_some((key, stops))
                })
        })
    }
}

/// Builder for [`SurfaceCatalog`], used by the snapshot loader and tests.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: SurfaceCatalog,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.catalog.timestamp = Some(at);
        self
    }

    /// Add a stop. A repeated id for the same operator is ignored.
    pub fn stop(
        mut self,
        operator: Operator,
        id: &str,
        name: &str,
        coord: Option<Coord>,
    ) -> Self {
        self.add_stop(Stop {
            id: StopId::new(id),
            name: name.to_string(),
            operator,
            coord,
        });
        self
    }

    pub fn route(mut self, operator: Operator, route: &str) -> Self {
        self.add_route(operator, route);
        self
    }

    /// Set the stop sequence of a route direction, registering the route.
    pub fn route_stops(mut self, operator: Operator, key: RouteKey, stops: &[&str]) -> Self {
        let ids = stops.iter().map(|s| StopId::new(*s)).collect();
        self.add_route_stops(operator, key, ids);
        self
    }

    pub(super) fn add_stop(&mut self, stop: Stop) {
        let data = self.catalog.operators.entry(stop.operator).or_default();
        if data.index.contains_key(&stop.id) {
            return;
        }
        data.index.insert(stop.id.clone(), data.stops.len());
        data.stops.push(stop);
    }

    pub(super) fn add_route(&mut self, operator: Operator, route: &str) {
        let data = self.catalog.operators.entry(operator).or_default();
        if !data.routes.iter().any(|r| r == route) {
            data.routes.push(route.to_string());
        }
    }

    pub(super) fn add_route_stops(&mut self, operator: Operator, key: RouteKey, stops: Vec<StopId>) {
        self.add_route(operator, key.route());
        let data = self.catalog.operators.entry(operator).or_default();
        data.route_stops.insert(key, stops);
    }

    pub(super) fn set_timestamp(&mut self, at: Option<DateTime<Utc>>) {
        self.catalog.timestamp = at;
    }

    pub fn build(self) -> SurfaceCatalog {
        self.catalog
    }
}
