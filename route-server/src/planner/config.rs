//! Resolver configuration.

use crate::domain::Proximity;
use crate::landmarks::FuzzyMatcher;

/// Configuration parameters for route resolution.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Minimum fuzzy score for a phrase to resolve to a landmark.
    pub min_score: f64,

    /// Lowest fuzzy score still offered as a "did you mean" suggestion.
    pub suggestion_floor: f64,

    /// Maximum number of "did you mean" suggestions per phrase.
    pub suggestion_limit: usize,

    /// Maximum number of transfer options returned.
    pub max_transfers: usize,

    /// Transfer points listed per option in text replies.
    pub transfer_points_shown: usize,

    /// Proximity tiers accepted for direct suggestions.
    /// `Far` is rejected even if listed here.
    pub acceptable: Vec<Proximity>,
}

impl ResolverConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        min_score: f64,
        suggestion_floor: f64,
        suggestion_limit: usize,
        max_transfers: usize,
        transfer_points_shown: usize,
        acceptable: Vec<Proximity>,
    ) -> Self {
        Self {
            min_score,
            suggestion_floor,
            suggestion_limit,
            max_transfers,
            transfer_points_shown,
            acceptable,
        }
    }

    /// Whether a tier qualifies for a direct suggestion.
    pub fn is_acceptable(&self, proximity: Proximity) -> bool {
        proximity != Proximity::Far && self.acceptable.contains(&proximity)
    }

    /// Fuzzy matcher using this configuration's thresholds.
    pub fn matcher(&self) -> FuzzyMatcher {
        FuzzyMatcher::new(self.min_score, self.suggestion_floor, self.suggestion_limit)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_score: 0.6,
            suggestion_floor: 0.3,
            suggestion_limit: 5,
            max_transfers: 3,
            transfer_points_shown: 2,
            acceptable: vec![Proximity::VeryNear, Proximity::Medium],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ResolverConfig::default();

        assert_eq!(config.min_score, 0.6);
        assert_eq!(config.suggestion_floor, 0.3);
        assert_eq!(config.suggestion_limit, 5);
        assert_eq!(config.max_transfers, 3);
        assert_eq!(config.transfer_points_shown, 2);
        assert!(config.is_acceptable(Proximity::VeryNear));
        assert!(config.is_acceptable(Proximity::Medium));
        assert!(!config.is_acceptable(Proximity::Far));
    }

    #[test]
    fn far_is_never_acceptable() {
        let config = ResolverConfig::new(0.6, 0.3, 5, 3, 2, Proximity::ALL.to_vec());
        assert!(!config.is_acceptable(Proximity::Far));
    }

    #[test]
    fn matcher_uses_thresholds() {
        let config = ResolverConfig::new(0.7, 0.4, 2, 3, 2, vec![Proximity::VeryNear]);
        let matcher = config.matcher();

        assert_eq!(matcher.min_score, 0.7);
        assert_eq!(matcher.suggestion_floor, 0.4);
        assert_eq!(matcher.suggestion_limit, 2);
        assert!(!config.is_acceptable(Proximity::Medium));
    }
}
