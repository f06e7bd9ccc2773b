//! Search configuration for the rail route planner.

/// Configuration parameters for rail route search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of interchanges on one route.
    /// Branches are pruned once this many have been made.
    pub max_interchanges: usize,

    /// Score added per interchange, in the same unit as stations passed.
    pub interchange_penalty: u32,

    /// Number of ranked candidates kept after sorting.
    pub max_candidates: usize,

    /// Maximum number of alternatives reported beside the best route.
    pub max_alternatives: usize,

    /// Minutes of travel per station passed, for duration estimates.
    pub minutes_per_station: u32,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        max_interchanges: usize,
        interchange_penalty: u32,
        max_candidates: usize,
        max_alternatives: usize,
        minutes_per_station: u32,
    ) -> Self {
        Self {
            max_interchanges,
            interchange_penalty,
            max_candidates,
            max_alternatives,
            minutes_per_station,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_interchanges: 5,
            interchange_penalty: 5,
            max_candidates: 3,
            max_alternatives: 2,
            minutes_per_station: 2,
        }
    }
}
