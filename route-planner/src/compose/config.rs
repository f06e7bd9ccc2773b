//! Composer configuration.

/// Parameters for multi-modal itinerary composition.
#[derive(Debug, Clone)]
pub struct ComposerConfig {
    /// Walking radius between a bus stop and a rail station, and between two
    /// stops at a bus transfer (metres).
    pub interchange_radius_m: f64,

    /// Wider radius tried when no direct bus is found within
    /// `interchange_radius_m` (metres).
    pub direct_radius_m: f64,

    /// Rail stations nearest a bus endpoint that are evaluated.
    pub candidate_stations: usize,

    /// Minutes per bus stop travelled.
    pub minutes_per_stop: u32,

    pub walking_speed_kmh: f64,

    /// Transfer itineraries kept per candidate station.
    pub max_transfer_itineraries: usize,
}

impl ComposerConfig {
    /// Walking time for `metres`, rounded to whole minutes.
    ///
    /// ```
    /// use route_planner::compose::ComposerConfig;
    ///
    /// let config = ComposerConfig::default();
    /// assert_eq!(config.walking_minutes(500.0), 6);
    /// assert_eq!(config.walking_minutes(0.0), 0);
    /// ```
    pub fn walking_minutes(&self, metres: f64) -> u32 {
        if self.walking_speed_kmh <= 0.0 {
            return 0;
        }
        let minutes = metres / (self.walking_speed_kmh * 1000.0) * 60.0;
        minutes.round().max(0.0) as u32
    }
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            interchange_radius_m: 500.0,
            direct_radius_m: 1000.0,
            candidate_stations: 3,
            minutes_per_stop: 2,
            walking_speed_kmh: 5.0,
            max_transfer_itineraries: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ComposerConfig::default();
        assert_eq!(config.interchange_radius_m, 500.0);
        assert_eq!(config.direct_radius_m, 1000.0);
        assert_eq!(config.candidate_stations, 3);
        assert_eq!(config.minutes_per_stop, 2);
        assert_eq!(config.walking_speed_kmh, 5.0);
        assert_eq!(config.max_transfer_itineraries, 5);
    }

    #[test]
    fn walking_rounds_to_nearest_minute() {
        let config = ComposerConfig::default();
        // 5 km/h is 83.3 m per minute.
        assert_eq!(config.walking_minutes(41.0), 0);
        assert_eq!(config.walking_minutes(42.0), 1);
        assert_eq!(config.walking_minutes(1000.0), 12);
    }
}
