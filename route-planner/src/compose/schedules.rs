use std::collections::HashMap;

use futures::future::join_all;
use tracing::debug;

use crate::domain::StationCode;
use crate::network::RailNetwork;
use crate::schedule::{SchedulesByLine, ScheduleSource, collect};

use super::Itinerary;

/// Fetch live schedules for the rail leg of every itinerary.
///
/// Legs sharing an origin and destination share one set of fetches.
pub async fn attach_schedules<S: ScheduleSource>(
    source: &S,
    network: &RailNetwork,
    itineraries: &mut [Itinerary],
) {
    let mut wanted: Vec<(StationCode, StationCode, Vec<_>)> = Vec::new();
    for itinerary in itineraries.iter() {
        let Some(rail) = itinerary.legs.rail() else {
            continue;
        };
        if !wanted.iter().any(|(f, t, _)| (*f, *t) == (rail.from, rail.to)) {
            wanted.push((rail.from, rail.to, rail.plan.boardings()));
        }
    }

    debug!(legs = wanted.len(), "fetching schedules");

    let fetches = wanted.iter().map(|(from, to, boardings)| async move {
        ((*from, *to), collect(source, network, boardings).await)
    });
    let fetched: HashMap<(StationCode, StationCode), SchedulesByLine> =
        join_all(fetches).await.into_iter().collect();

    for itinerary in itineraries.iter_mut() {
        if let Some(rail) = itinerary.legs.rail_mut() {
            rail.schedules = fetched.get(&(rail.from, rail.to)).cloned();
        }
    }
}
