//! Surface-transit (bus) stops and routes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coord;

/// A bus operator present in the surface catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operator {
    /// Kowloon Motor Bus.
    #[serde(rename = "kmb")]
    Kmb,
    /// Citybus.
    #[serde(rename = "ctb")]
    Citybus,
}

impl Operator {
    pub const ALL: [Operator; 2] = [Operator::Kmb, Operator::Citybus];

    /// Parse the short operator key used in catalogue snapshots and requests.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kmb" => Some(Operator::Kmb),
            "ctb" => Some(Operator::Citybus),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Kmb => "kmb",
            Operator::Citybus => "ctb",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operator-scoped stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    pub fn new(id: impl Into<String>) -> Self {
        StopId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Travel direction of a bus route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outbound,
    Inbound,
}

impl Direction {
    /// Accepts `outbound`/`inbound` and the short `O`/`I` forms.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "outbound" | "o" => Some(Direction::Outbound),
            "inbound" | "i" => Some(Direction::Inbound),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Outbound => "outbound",
            Direction::Inbound => "inbound",
        }
    }
}

/// A route in one direction, written `<route>-<direction>`.
///
/// ```
/// use route_planner::domain::{Direction, RouteKey};
///
/// let key = RouteKey::parse("N-A12-O").unwrap();
/// assert_eq!(key.route(), "N-A12");
/// assert_eq!(key.direction(), Direction::Outbound);
/// assert_eq!(key.to_string(), "N-A12-outbound");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey {
    route: String,
    direction: Direction,
}

impl RouteKey {
    pub fn new(route: impl Into<String>, direction: Direction) -> Self {
        RouteKey {
            route: route.into(),
            direction,
        }
    }

    /// Split at the last `-`, so route names may themselves contain dashes.
    pub fn parse(s: &str) -> Option<Self> {
        let (route, direction) = s.rsplit_once('-')?;
        if route.is_empty() {
            return None;
        }
        Some(RouteKey::new(route, Direction::parse(direction)?))
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.route, self.direction.as_str())
    }
}

/// A bus stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub operator: Operator,
    /// `None` when the feed had no usable coordinate; such stops never match.
    pub coord: Option<Coord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_keys() {
        assert_eq!(Operator::parse("KMB"), Some(Operator::Kmb));
        assert_eq!(Operator::parse("ctb"), Some(Operator::Citybus));
        assert_eq!(Operator::parse("nlb"), None);
        assert_eq!(serde_json::to_string(&Operator::Citybus).unwrap(), "\"ctb\"");
    }

    #[test]
    fn route_key_variants() {
        assert_eq!(
            RouteKey::parse("1A-outbound"),
            Some(RouteKey::new("1A", Direction::Outbound))
        );
        assert_eq!(
            RouteKey::parse("970-I"),
            Some(RouteKey::new("970", Direction::Inbound))
        );
        assert_eq!(RouteKey::parse("1A"), None);
        assert_eq!(RouteKey::parse("-outbound"), None);
        assert_eq!(RouteKey::parse("1A-sideways"), None);
    }
}
