//! Defaults applied to itinerary queries and selections.

use crate::domain::{DEFAULT_MAX_PATHS, DEFAULT_MAX_WAIT_TIME};

/// Configuration for itinerary requests.
#[derive(Debug, Clone)]
pub struct ItineraryConfig {
    /// Alternatives requested when the caller does not say.
    pub default_max_paths: usize,

    /// Longest acceptable platform wait when the caller does not say (seconds).
    pub default_max_wait_secs: u32,

    /// Fold overnight times ("24:10:00") back onto the clock before
    /// reconstructing, so that late rides still get interpolated times.
    pub normalize_overnight: bool,
}

impl ItineraryConfig {
    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.default_max_paths = max_paths;
        self
    }

    pub fn with_max_wait_secs(mut self, secs: u32) -> Self {
        self.default_max_wait_secs = secs;
        self
    }

    pub fn with_overnight_normalization(mut self, enabled: bool) -> Self {
        self.normalize_overnight = enabled;
        self
    }
}

impl Default for ItineraryConfig {
    fn default() -> Self {
        Self {
            default_max_paths: DEFAULT_MAX_PATHS,
            default_max_wait_secs: DEFAULT_MAX_WAIT_TIME, // 30 minutes
            normalize_overnight: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ItineraryConfig::default();

        assert_eq!(config.default_max_paths, 4);
        assert_eq!(config.default_max_wait_secs, 1800);
        assert!(!config.normalize_overnight);
    }

    #[test]
    fn builder() {
        let config = ItineraryConfig::default()
            .with_max_paths(2)
            .with_max_wait_secs(600)
            .with_overnight_normalization(true);

        assert_eq!(config.default_max_paths, 2);
        assert_eq!(config.default_max_wait_secs, 600);
        assert!(config.normalize_overnight);
    }
}
