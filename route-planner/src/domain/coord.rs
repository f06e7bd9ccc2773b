//! Geographic coordinates.

use geo::Point;
use serde::Serialize;

/// A WGS84 latitude/longitude pair in degrees.
///
/// Coordinates can only be built from finite, in-range values. Data that fails
/// validation has no coordinate at all, it is never coerced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coord {
    lat: f64,
    lon: f64,
}

impl Coord {
    /// Returns `None` if either value is non-finite or out of range.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        valid.then_some(Coord { lat, lon })
    }

    /// Parse a coordinate from decimal-degree strings, as surface-transit feeds
    /// encode them.
    ///
    /// ```
    /// use route_planner::domain::Coord;
    ///
    /// assert!(Coord::parse("22.2848", "114.1582").is_some());
    /// assert!(Coord::parse("", "114.1582").is_none());
    /// assert!(Coord::parse("north", "114.1582").is_none());
    /// ```
    pub fn parse(lat: &str, lon: &str) -> Option<Self> {
        let lat = lat.trim().parse().ok()?;
        let lon = lon.trim().parse().ok()?;
        Self::new(lat, lon)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Convert to a `geo` point (x = longitude, y = latitude).
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range() {
        assert!(Coord::new(91.0, 0.0).is_none());
        assert!(Coord::new(0.0, -180.5).is_none());
        assert!(Coord::new(f64::NAN, 114.0).is_none());
        assert!(Coord::new(22.3, f64::INFINITY).is_none());
    }

    #[test]
    fn parses_padded_strings() {
        let c = Coord::parse(" 22.3042 ", "114.1869").unwrap();
        assert_eq!(c.lat(), 22.3042);
        assert_eq!(c.lon(), 114.1869);
    }

    #[test]
    fn point_axes_are_lon_lat() {
        let p = Coord::new(22.0, 114.0).unwrap().to_point();
        assert_eq!(p.x(), 114.0);
        assert_eq!(p.y(), 22.0);
    }
}
