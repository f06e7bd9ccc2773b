//! Bus leg discovery between two points.

use std::collections::HashMap;

use tracing::trace;

use crate::catalog::SurfaceCatalog;
use crate::domain::{Coord, Operator, RouteKey, StopId};
use crate::spatial::{Nearest, nearby};

use super::itinerary::{BusLeg, StopMatch};

/// Stops of `operator` within `radius_m` of `point`, keyed by id.
pub(super) fn stops_near<'c>(
    catalog: &'c SurfaceCatalog,
    operator: Operator,
    point: Coord,
    radius_m: f64,
) -> HashMap<&'c StopId, f64> {
    nearby(point, catalog.stops_of(operator), radius_m)
        .into_iter()
        .map(|Nearest { item, distance_m }| (&item.id, distance_m))
        .collect()
}

/// The closest stop of `sequence[from..]` found in `near`. Earlier positions
/// win ties.
pub(super) fn closest_in(
    sequence: &[StopId],
    from: usize,
    near: &HashMap<&StopId, f64>,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, id) in sequence.iter().enumerate().skip(from) {
        let Some(&d) = near.get(id) else {
            continue;
        };
        if best.is_none_or(|(_, b)| d < b) {
            best = Some((index, d));
        }
    }
    best
}

fn stop_match(
    catalog: &SurfaceCatalog,
    operator: Operator,
    id: &StopId,
    index: usize,
    walk_m: f64,
) -> StopMatch {
    let name = catalog
        .stop(operator, id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| format!("Stop {id}"));
    StopMatch {
        id: id.clone(),
        name,
        index,
        walk_m,
    }
}

pub(super) fn bus_leg(
    catalog: &SurfaceCatalog,
    operator: Operator,
    key: &RouteKey,
    sequence: &[StopId],
    boarding: (usize, f64),
    alighting: (usize, f64),
) -> BusLeg {
    let (board_at, board_walk) = boarding;
    let (alight_at, alight_walk) = alighting;
    BusLeg {
        operator,
        route: key.route().to_string(),
        direction: key.direction(),
        boarding: stop_match(catalog, operator, &sequence[board_at], board_at, board_walk),
        alighting: stop_match(catalog, operator, &sequence[alight_at], alight_at, alight_walk),
        stop_count: alight_at - board_at,
    }
}

/// One leg per route direction of `operator` that runs from near `from` to
/// near `to`.
///
/// The boarding stop is the route's closest stop to `from` within `radius_m`;
/// the alighting stop is its closest stop to `to` within `radius_m` strictly
/// after the boarding stop. Legs are returned in catalogue route order.
pub fn match_bus_legs(
    catalog: &SurfaceCatalog,
    operator: Operator,
    from: Coord,
    to: Coord,
    radius_m: f64,
) -> Vec<BusLeg> {
    let near_from = stops_near(catalog, operator, from, radius_m);
    if near_from.is_empty() {
        return Vec::new();
    }
    let near_to = stops_near(catalog, operator, to, radius_m);
    if near_to.is_empty() {
        return Vec::new();
    }

    let mut legs = Vec::new();
    for (key, sequence) in catalog.route_sequences(operator) {
        let Some(boarding) = closest_in(sequence, 0, &near_from) else {
            continue;
        };
        let Some(alighting) = closest_in(sequence, boarding.0 + 1, &near_to) else {
            continue;
        };
        trace!(
            operator = %operator,
            route = %key,
            board = boarding.0,
            alight = alighting.0,
            "bus leg"
        );
        legs.push(bus_leg(catalog, operator, &key, sequence, boarding, alighting));
    }
    legs
}

/// Stops from which `operator` reaches near `to` within `radius_m`, each with
/// the route direction and alighting position that gets there.
///
/// Every boarding position gets the closest near-`to` stop strictly after it,
/// so a route that passes the destination twice offers both approaches.
pub(super) fn feeders<'c>(
    catalog: &'c SurfaceCatalog,
    operator: Operator,
    to: Coord,
    radius_m: f64,
) -> HashMap<&'c StopId, Vec<Feeder<'c>>> {
    let near_to = stops_near(catalog, operator, to, radius_m);
    let mut out: HashMap<&StopId, Vec<Feeder>> = HashMap::new();
    if near_to.is_empty() {
        return out;
    }

    for (key, sequence) in catalog.route_sequences(operator) {
        // Closest near-`to` stop after `index`; earlier positions win ties.
        let mut later: Option<(usize, f64)> = None;
        for (index, id) in sequence.iter().enumerate().rev() {
            if let Some(alighting) = later {
                out.entry(id).or_default().push(Feeder {
                    key: key.clone(),
                    sequence,
                    boarding: index,
                    alighting,
                });
            }
            if let Some(&d) = near_to.get(id) {
                if later.is_none_or(|(_, best)| d <= best) {
                    later = Some((index, d));
                }
            }
        }
    }
    out
}

/// A way onward from one stop, found by [`feeders`].
#[derive(Debug, Clone)]
pub(super) struct Feeder<'c> {
    pub key: RouteKey,
    pub sequence: &'c [StopId],
    pub boarding: usize,
    pub alighting: (usize, f64),
}
