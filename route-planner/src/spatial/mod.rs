//! Geospatial matching.
//!
//! Great-circle distances and radius/nearest queries over anything that may
//! carry a coordinate. Candidates without a coordinate are skipped by every
//! query. All distances are metres.

use geo::HaversineDistance;

use crate::domain::{Coord, StationCode, Stop};
use crate::network::StationInfo;

/// Something with an optional position.
pub trait Located {
    fn coord(&self) -> Option<Coord>;
}

impl Located for Coord {
    fn coord(&self) -> Option<Coord> {
        Some(*self)
    }
}

impl Located for Stop {
    fn coord(&self) -> Option<Coord> {
        self.coord
    }
}

impl Located for StationInfo {
    fn coord(&self) -> Option<Coord> {
        self.coord
    }
}

impl Located for (StationCode, &StationInfo) {
    fn coord(&self) -> Option<Coord> {
        self.1.coord
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn coord(&self) -> Option<Coord> {
        (**self).coord()
    }
}

/// A matched candidate and its distance from the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<T> {
    pub item: T,
    pub distance_m: f64,
}

/// Haversine distance in metres.
///
/// ```
/// use route_planner::domain::Coord;
/// use route_planner::spatial::distance;
///
/// let hok = Coord::new(22.2848, 114.1582).unwrap();
/// let cen = Coord::new(22.2848, 114.1588).unwrap();
/// let d = distance(hok, cen);
/// assert!(d > 55.0 && d < 70.0);
/// ```
pub fn distance(a: Coord, b: Coord) -> f64 {
    a.to_point().haversine_distance(&b.to_point())
}

/// Every candidate within `radius_m` (inclusive), in input order.
pub fn nearby<T: Located>(
    point: Coord,
    candidates: impl IntoIterator<Item = T>,
    radius_m: f64,
) -> Vec<Nearest<T>> {
    candidates
        .into_iter()
        .filter_map(|item| {
            let distance_m = distance(point, item.coord()?);
            (distance_m <= radius_m).then_some(Nearest { item, distance_m })
        })
        .collect()
}

/// The single closest candidate. Earlier candidates win ties.
pub fn nearest<T: Located>(
    point: Coord,
    candidates: impl IntoIterator<Item = T>,
) -> Option<Nearest<T>> {
    let mut best: Option<Nearest<T>> = None;
    for item in candidates {
        let Some(coord) = item.coord() else {
            continue;
        };
        let distance_m = distance(point, coord);
        if best.as_ref().is_none_or(|b| distance_m < b.distance_m) {
            best = Some(Nearest { item, distance_m });
        }
    }
    best
}

/// Up to `n` closest candidates, ascending by distance, ties in input order.
pub fn nearest_n<T: Located>(
    point: Coord,
    candidates: impl IntoIterator<Item = T>,
    n: usize,
) -> Vec<Nearest<T>> {
    let mut found = nearby(point, candidates, f64::INFINITY);
    sort_by_distance(&mut found);
    found.truncate(n);
    found
}

/// Stable ascending sort by distance.
pub fn sort_by_distance<T>(matches: &mut [Nearest<T>]) {
    matches.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
}
