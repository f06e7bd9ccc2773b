//! Candidate ranking and best/alternative selection.

use super::CandidateRailRoute;
use crate::domain::{LineCode, StationCode};

/// The chosen route and its alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    pub best: CandidateRailRoute,
    pub alternatives: Vec<CandidateRailRoute>,
}

impl RoutePlan {
    /// Best route first, then alternatives.
    pub fn routes(&self) -> impl Iterator<Item = &CandidateRailRoute> {
        std::iter::once(&self.best).chain(self.alternatives.iter())
    }

    /// Distinct `(line, boarding station)` pairs over every route, in first-seen
    /// route order.
    pub fn boardings(&self) -> Vec<(LineCode, StationCode)> {
        let mut out = Vec::new();
        for pair in self.routes().flat_map(|r| r.boardings()) {
            if !out.contains(&pair) {
                out.push(pair);
            }
        }
        out
    }
}

/// Sort by travel time, keeping discovery order among equals, and keep the
/// first `keep`.
pub fn rank_candidates(
    mut candidates: Vec<CandidateRailRoute>,
    keep: usize,
) -> Vec<CandidateRailRoute> {
    candidates.sort_by_key(|c| c.travel_time);
    candidates.truncate(keep);
    candidates
}

/// Split ranked candidates into the best route and up to `max_alternatives`
/// others. A direct best route has no alternatives.
pub fn split_best(
    ranked: Vec<CandidateRailRoute>,
    max_alternatives: usize,
) -> Option<RoutePlan> {
    let mut iter = ranked.into_iter();
    let best = iter.next()?;
    let alternatives = if best.interchange_count == 0 {
        Vec::new()
    } else {
        iter.take(max_alternatives).collect()
    };
    Some(RoutePlan { best, alternatives })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lc(s: &str) -> LineCode {
        LineCode::parse(s).unwrap()
    }

    fn sc(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn candidate(lines: &[&str], changes: usize, passed: usize) -> CandidateRailRoute {
        CandidateRailRoute {
            lines: lines.iter().map(|l| lc(l)).collect(),
            boarding_stations: vec![sc("ORG"); lines.len()],
            interchanges: vec![sc("DST")],
            interchange_count: changes,
            stations_passed: passed,
            travel_time: (passed + 5 * changes) as u32,
        }
    }

    #[test]
    fn rank_sorts_ascending_and_truncates() {
        let ranked = rank_candidates(
            vec![
                candidate(&["AAA", "BBB"], 1, 10),
                candidate(&["CCC"], 0, 4),
                candidate(&["DDD", "EEE"], 1, 2),
                candidate(&["FFF", "GGG", "HHH"], 2, 20),
            ],
            3,
        );

        let times: Vec<_> = ranked.iter().map(|c| c.travel_time).collect();
        assert_eq!(times, vec![4, 7, 15]);
    }

    #[test]
    fn rank_is_stable_on_ties() {
        let ranked = rank_candidates(
            vec![candidate(&["AAA"], 0, 3), candidate(&["BBB"], 0, 3)],
            3,
        );
        assert_eq!(ranked[0].lines, vec![lc("AAA")]);
        assert_eq!(ranked[1].lines, vec![lc("BBB")]);
    }

    #[test]
    fn direct_best_has_no_alternatives() {
        let plan = split_best(
            vec![candidate(&["AAA"], 0, 3), candidate(&["BBB", "CCC"], 1, 1)],
            2,
        )
        .unwrap();
        assert!(plan.alternatives.is_empty());
    }

    #[test]
    fn indirect_best_keeps_alternatives() {
        let plan = split_best(
            vec![
                candidate(&["AAA", "BBB"], 1, 1),
                candidate(&["CCC", "DDD"], 1, 2),
                candidate(&["EEE", "FFF"], 1, 3),
            ],
            1,
        )
        .unwrap();
        assert_eq!(plan.alternatives.len(), 1);
        assert_eq!(plan.routes().count(), 2);
    }

    #[test]
    fn empty_gives_none() {
        assert_eq!(split_best(Vec::new(), 2), None);
    }

    #[test]
    fn boardings_follow_route_order() {
        let mut best = candidate(&["AAA", "BBB"], 1, 1);
        best.boarding_stations = vec![sc("ORG"), sc("XCH")];
        let plan = RoutePlan {
            best,
            alternatives: vec![candidate(&["CCC"], 0, 9)],
        };
        assert_eq!(
            plan.boardings(),
            vec![
                (lc("AAA"), sc("ORG")),
                (lc("BBB"), sc("XCH")),
                (lc("CCC"), sc("ORG")),
            ]
        );
    }

    #[test]
    fn boardings_shared_between_routes_are_listed_once() {
        let mut best = candidate(&["AAA", "BBB"], 1, 1);
        best.boarding_stations = vec![sc("ORG"), sc("XCH")];
        let mut other = candidate(&["AAA", "CCC"], 1, 2);
        other.boarding_stations = vec![sc("ORG"), sc("XCH")];
        let plan = RoutePlan {
            best,
            alternatives: vec![other],
        };
        assert_eq!(
            plan.boardings(),
            vec![
                (lc("AAA"), sc("ORG")),
                (lc("BBB"), sc("XCH")),
                (lc("CCC"), sc("XCH")),
            ]
        );
    }
}
