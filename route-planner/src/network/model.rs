use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::warn;

use super::NetworkError;
use crate::domain::{Coord, LineCode, StationCode};

/// A line terminus: a single station, or several for branch lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminal {
    Single(StationCode),
    Branches(Vec<StationCode>),
}

impl Terminal {
    pub fn stations(&self) -> &[StationCode] {
        match self {
            Terminal::Single(s) => std::slice::from_ref(s),
            Terminal::Branches(v) => v,
        }
    }
}

/// A rail line and its ordered station sequence.
#[derive(Debug, Clone)]
pub struct Line {
    code: LineCode,
    name: String,
    order: Vec<StationCode>,
    first: Terminal,
    last: Terminal,
}

impl Line {
    pub fn code(&self) -> LineCode {
        self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order(&self) -> &[StationCode] {
        &self.order
    }

    /// The terminus a train from `from` heads for to reach `to`, or `None`
    /// when either station is off the line or they coincide.
    pub fn towards(&self, from: StationCode, to: StationCode) -> Option<&Terminal> {
        let (a, b) = (self.position(from)?, self.position(to)?);
        match b.cmp(&a) {
            Ordering::Greater => Some(&self.last),
            Ordering::Less => Some(&self.first),
            Ordering::Equal => None,
        }
    }

    /// Index of the station in the line order.
    pub fn position(&self, station: StationCode) -> Option<usize> {
        self.order.iter().position(|&s| s == station)
    }

    pub fn serves(&self, station: StationCode) -> bool {
        self.order.contains(&station)
    }
}

/// Number of hops between two stations along one line.
///
/// `Unreachable` sorts after every `Reachable` count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Hops {
    Reachable(usize),
    Unreachable,
}

impl Hops {
    pub fn count(self) -> Option<usize> {
        match self {
            Hops::Reachable(n) => Some(n),
            Hops::Unreachable => None,
        }
    }
}

/// Absolute index difference of `a` and `b` on `line`.
pub fn stations_between(line: &Line, a: StationCode, b: StationCode) -> Hops {
    match (line.position(a), line.position(b)) {
        (Some(i), Some(j)) => Hops::Reachable(i.abs_diff(j)),
        _ => Hops::Unreachable,
    }
}

/// A station where two or more lines meet.
#[derive(Debug, Clone)]
pub struct Interchange {
    station: StationCode,
    lines: Vec<LineCode>,
}

impl Interchange {
    pub fn station(&self) -> StationCode {
        self.station
    }

    pub fn lines(&self) -> &[LineCode] {
        &self.lines
    }
}

#[derive(Debug, Clone)]
pub struct StationInfo {
    pub name: String,
    pub coord: Option<Coord>,
}

/// Immutable rail topology, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct RailNetwork {
    lines: Vec<Line>,
    by_code: HashMap<LineCode, usize>,
    interchanges: Vec<Interchange>,
    stations: BTreeMap<StationCode, StationInfo>,
}

impl RailNetwork {
    pub fn line(&self, code: LineCode) -> Option<&Line> {
        self.by_code.get(&code).map(|&i| &self.lines[i])
    }

    /// All lines, in declaration order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Lines whose order contains `station`, in declaration order.
    pub fn lines_serving(&self, station: StationCode) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter().filter(move |l| l.serves(station))
    }

    /// Lines meeting at `station`, if it is an interchange of more than one line.
    pub fn interchange_lines(&self, station: StationCode) -> Option<&[LineCode]> {
        self.interchanges
            .iter()
            .find(|i| i.station == station)
            .map(|i| i.lines.as_slice())
            .filter(|lines| lines.len() > 1)
    }

    /// Interchanges joining more than one line, in declaration order.
    pub fn interchanges(&self) -> impl Iterator<Item = &Interchange> + '_ {
        self.interchanges.iter().filter(|i| i.lines.len() > 1)
    }

    pub fn is_interchange(&self, station: StationCode) -> bool {
        self.interchange_lines(station).is_some()
    }

    pub fn station_name(&self, station: StationCode) -> Option<&str> {
        self.stations.get(&station).map(|s| s.name.as_str())
    }

    pub fn station_coord(&self, station: StationCode) -> Option<Coord> {
        self.stations.get(&station).and_then(|s| s.coord)
    }

    pub fn contains_station(&self, station: StationCode) -> bool {
        self.stations.contains_key(&station)
    }

    /// Every station of the network, ordered by code.
    pub fn stations(&self) -> impl Iterator<Item = (StationCode, &StationInfo)> + '_ {
        self.stations.iter().map(|(&code, info)| (code, info))
    }
}

struct LineSpec {
    code: String,
    name: String,
    order: Vec<String>,
    first: Option<Vec<String>>,
    last: Option<Vec<String>>,
}

/// Builder for [`RailNetwork`]; codes are validated in [`build`](Self::build).
///
/// ```
/// use route_planner::domain::StationCode;
/// use route_planner::network::RailNetworkBuilder;
///
/// let network = RailNetworkBuilder::new()
///     .line("AAA", "A Line", &["ONE", "TWO", "THR"])
///     .line("BBB", "B Line", &["TWO", "FOU"])
///     .interchange("TWO", &["AAA", "BBB"])
///     .build()
///     .unwrap();
///
/// let two = StationCode::parse("TWO").unwrap();
/// assert_eq!(network.lines_serving(two).count(), 2);
/// assert!(network.is_interchange(two));
/// ```
#[derive(Default)]
pub struct RailNetworkBuilder {
    lines: Vec<LineSpec>,
    interchanges: Vec<(String, Vec<String>)>,
    stations: Vec<(String, String, Option<Coord>)>,
}

impl RailNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line whose terminals are the two ends of `order`.
    pub fn line(mut self, code: &str, name: &str, order: &[&str]) -> Self {
        self.lines.push(LineSpec {
            code: code.to_string(),
            name: name.to_string(),
            order: order.iter().map(|s| s.to_string()).collect(),
            first: None,
            last: None,
        });
        self
    }

    /// Add a line with explicit terminals, for branch lines.
    pub fn line_with_terminals(
        mut self,
        code: &str,
        name: &str,
        order: &[&str],
        first: &[&str],
        last: &[&str],
    ) -> Self {
        self.lines.push(LineSpec {
            code: code.to_string(),
            name: name.to_string(),
            order: order.iter().map(|s| s.to_string()).collect(),
            first: Some(first.iter().map(|s| s.to_string()).collect()),
            last: Some(last.iter().map(|s| s.to_string()).collect()),
        });
        self
    }

    pub fn interchange(mut self, station: &str, lines: &[&str]) -> Self {
        self.interchanges.push((
            station.to_string(),
            lines.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    pub fn station(mut self, code: &str, name: &str, coord: Option<Coord>) -> Self {
        self.stations
            .push((code.to_string(), name.to_string(), coord));
        self
    }

    pub fn build(self) -> Result<RailNetwork, NetworkError> {
        let mut lines = Vec::with_capacity(self.lines.len());
        let mut by_code = HashMap::new();

        for spec in self.lines {
            let code = LineCode::parse(&spec.code)?;
            if by_code.contains_key(&code) {
                return Err(NetworkError::DuplicateLine(code));
            }

            let order = parse_stations(&spec.order)?;
            let mut seen = HashSet::new();
            for &station in &order {
                if !seen.insert(station) {
                    return Err(NetworkError::RepeatedStation { line: code, station });
                }
            }
            let (Some(&head), Some(&tail)) = (order.first(), order.last()) else {
                return Err(NetworkError::EmptyLine(code));
            };

            let first = match spec.first {
                Some(codes) => terminal(parse_stations(&codes)?, head),
                None => Terminal::Single(head),
            };
            let last = match spec.last {
                Some(codes) => terminal(parse_stations(&codes)?, tail),
                None => Terminal::Single(tail),
            };

            by_code.insert(code, lines.len());
            lines.push(Line {
                code,
                name: spec.name,
                order,
                first,
                last,
            });
        }

        let mut interchanges = Vec::with_capacity(self.interchanges.len());
        for (station, declared) in self.interchanges {
            let station = StationCode::parse(&station)?;
            let mut meeting = Vec::with_capacity(declared.len());
            for line in declared {
                let line = LineCode::parse(&line)?;
                let Some(&index) = by_code.get(&line) else {
                    return Err(NetworkError::UnknownInterchangeLine { station, line });
                };
                if !lines[index].serves(station) {
                    warn!(
                        station = %station,
                        line = %line,
                        "interchange line does not serve station, ignoring"
                    );
                    continue;
                }
                if !meeting.contains(&line) {
                    meeting.push(line);
                }
            }
            interchanges.push(Interchange {
                station,
                lines: meeting,
            });
        }

        let mut stations = BTreeMap::new();
        for line in &lines {
            for &code in &line.order {
                stations.entry(code).or_insert_with(|| StationInfo {
                    name: code.to_string(),
                    coord: None,
                });
            }
        }
        for (code, name, coord) in self.stations {
            let code = StationCode::parse(&code)?;
            stations.insert(code, StationInfo { name, coord });
        }

        Ok(RailNetwork {
            lines,
            by_code,
            interchanges,
            stations,
        })
    }
}

fn parse_stations(codes: &[String]) -> Result<Vec<StationCode>, NetworkError> {
    codes
        .iter()
        .map(|s| StationCode::parse(s).map_err(NetworkError::from))
        .collect()
}

fn terminal(mut codes: Vec<StationCode>, fallback: StationCode) -> Terminal {
    match codes.len() {
        0 => Terminal::Single(fallback),
        1 => Terminal::Single(codes.remove(0)),
        _ => Terminal::Branches(codes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sc(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn lc(s: &str) -> LineCode {
        LineCode::parse(s).unwrap()
    }

    fn sample() -> RailNetwork {
        RailNetworkBuilder::new()
            .line("AAA", "A Line", &["ONE", "TWO", "THR", "FOU"])
            .line_with_terminals("BBB", "B Line", &["TWO", "FIV", "SIX"], &["TWO"], &["SIX", "FIV"])
            .interchange("TWO", &["AAA", "BBB"])
            .interchange("FOU", &["AAA", "BBB"])
            .station("ONE", "One", Coord::new(22.0, 114.0))
            .build()
            .unwrap()
    }

    #[test]
    fn stations_between_counts_hops() {
        let net = sample();
        let a = net.line(lc("AAA")).unwrap();
        assert_eq!(stations_between(a, sc("ONE"), sc("FOU")), Hops::Reachable(3));
        assert_eq!(stations_between(a, sc("FOU"), sc("ONE")), Hops::Reachable(3));
        assert_eq!(stations_between(a, sc("TWO"), sc("TWO")), Hops::Reachable(0));
        assert_eq!(stations_between(a, sc("ONE"), sc("SIX")), Hops::Unreachable);
    }

    #[test]
    fn unreachable_sorts_last() {
        assert!(Hops::Unreachable > Hops::Reachable(usize::MAX));
        assert!(Hops::Reachable(1) < Hops::Reachable(2));
        assert_eq!(Hops::Unreachable.count(), None);
    }

    #[test]
    fn lines_serving_in_declaration_order() {
        let net = sample();
        let codes: Vec<_> = net.lines_serving(sc("TWO")).map(|l| l.code()).collect();
        assert_eq!(codes, vec![lc("AAA"), lc("BBB")]);
        assert_eq!(net.lines_serving(sc("XXX")).count(), 0);
    }

    #[test]
    fn branch_terminals_kept() {
        let net = sample();
        let b = net.line(lc("BBB")).unwrap();
        assert_eq!(b.towards(sc("SIX"), sc("TWO")), Some(&Terminal::Single(sc("TWO"))));
        assert_eq!(
            b.towards(sc("TWO"), sc("FIV")).map(Terminal::stations),
            Some(&[sc("SIX"), sc("FIV")][..])
        );
        assert_eq!(b.towards(sc("FIV"), sc("FIV")), None);
        assert_eq!(b.towards(sc("ONE"), sc("FIV")), None);
    }

    #[test]
    fn interchange_lines_that_do_not_serve_station_are_dropped() {
        let net = sample();
        // BBB does not call at FOU, leaving a single line there.
        assert_eq!(net.interchange_lines(sc("FOU")), None);
        assert_eq!(
            net.interchange_lines(sc("TWO")),
            Some(&[lc("AAA"), lc("BBB")][..])
        );
        assert_eq!(net.interchanges().count(), 1);
    }

    #[test]
    fn station_metadata_defaults_to_code() {
        let net = sample();
        assert_eq!(net.station_name(sc("ONE")), Some("One"));
        assert!(net.station_coord(sc("ONE")).is_some());
        assert_eq!(net.station_name(sc("SIX")), Some("SIX"));
        assert_eq!(net.station_coord(sc("SIX")), None);
    }

    #[test]
    fn duplicate_line_rejected() {
        let err = RailNetworkBuilder::new()
            .line("AAA", "A", &["ONE"])
            .line("AAA", "A again", &["TWO"])
            .build()
            .unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateLine(_)));
    }

    #[test]
    fn unknown_interchange_line_rejected() {
        let err = RailNetworkBuilder::new()
            .line("AAA", "A", &["ONE", "TWO"])
            .interchange("TWO", &["AAA", "ZZZ"])
            .build()
            .unwrap_err();
        assert!(matches!(err, NetworkError::UnknownInterchangeLine { .. }));
    }

    #[test]
    fn invalid_codes_rejected() {
        assert!(RailNetworkBuilder::new().line("aa", "A", &["ONE"]).build().is_err());
        assert!(RailNetworkBuilder::new().line("AAA", "A", &["one"]).build().is_err());
        assert!(matches!(
            RailNetworkBuilder::new().line("AAA", "A", &[]).build(),
            Err(NetworkError::EmptyLine(_))
        ));
        assert!(matches!(
            RailNetworkBuilder::new().line("AAA", "A", &["ONE", "ONE"]).build(),
            Err(NetworkError::RepeatedStation { .. })
        ));
    }

    proptest! {
        #[test]
        fn stations_between_symmetric(i in 0usize..4, j in 0usize..4) {
            let net = sample();
            let line = net.line(lc("AAA")).unwrap();
            let a = line.order()[i];
            let b = line.order()[j];
            prop_assert_eq!(stations_between(line, a, b), stations_between(line, b, a));
            prop_assert_eq!(stations_between(line, a, a), Hops::Reachable(0));
        }
    }
}
