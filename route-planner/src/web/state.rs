//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::CatalogHandle;
use crate::compose::ComposerConfig;
use crate::network::RailNetwork;
use crate::planner::SearchConfig;
use crate::schedule::ScheduleBackend;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Rail network, fixed for the life of the process
    pub network: Arc<RailNetwork>,

    /// Bus catalogue, swapped on refresh
    pub catalog: CatalogHandle,

    /// Live or mock schedule source
    pub schedules: Arc<ScheduleBackend>,

    pub search: Arc<SearchConfig>,

    pub composer: Arc<ComposerConfig>,
}

impl AppState {
    pub fn new(
        network: RailNetwork,
        catalog: CatalogHandle,
        schedules: ScheduleBackend,
        search: SearchConfig,
        composer: ComposerConfig,
    ) -> Self {
        Self {
            network: Arc::new(network),
            catalog,
            schedules: Arc::new(schedules),
            search: Arc::new(search),
            composer: Arc::new(composer),
        }
    }
}
