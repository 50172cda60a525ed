//! Fuzzy matching of free-text phrases against landmark names.

use crate::domain::{Landmark, normalize};

use super::index::{LandmarkIndex, display_line};

/// Similarity of two strings in `[0, 1]`, case-folded.
///
/// Normalized Levenshtein over chars, so Arabic text is compared letter by
/// letter rather than byte by byte.
///
/// ```
/// use route_server::landmarks::similarity;
///
/// assert_eq!(similarity("Port", "port"), 1.0);
/// assert!(similarity("مستشفى عام", "المستشفى العام") >= 0.6);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&normalize(a), &normalize(b))
}

/// An accepted fuzzy match.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    pub landmark: &'a Landmark,
    pub score: f64,
}

/// Scores phrases against every indexed landmark name.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    /// Scores at or above this are accepted matches.
    pub min_score: f64,
    /// Scores in `[suggestion_floor, min_score)` feed "did you mean" lists.
    pub suggestion_floor: f64,
    /// Maximum "did you mean" entries.
    pub suggestion_limit: usize,
}

impl FuzzyMatcher {
    pub fn new(min_score: f64, suggestion_floor: f64, suggestion_limit: usize) -> Self {
        Self {
            min_score,
            suggestion_floor,
            suggestion_limit,
        }
    }

    /// Best-scoring landmark for `query`, if it reaches `min_score`.
    ///
    /// Ties keep the landmark seen first in index order.
    pub fn find_best_match<'a>(&self, query: &str, index: &'a LandmarkIndex) -> Option<Match<'a>> {
        let query = normalize(query);
        if query.is_empty() {
            return None;
        }

        let mut best: Option<Match<'a>> = None;
        for (name, landmark) in index.entries() {
            let score = strsim::normalized_levenshtein(&query, name);
            if best.is_none_or(|b| score > b.score) {
                best = Some(Match { landmark, score });
            }
        }

        best.filter(|m| m.score >= self.min_score)
    }

    /// All landmarks scoring at least `floor`, best first (ties in index order).
    pub fn ranked<'a>(&self, query: &str, index: &'a LandmarkIndex, floor: f64) -> Vec<Match<'a>> {
        let query = normalize(query);
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<Match<'a>> = index
            .entries()
            .map(|(name, landmark)| Match {
                landmark,
                score: strsim::normalized_levenshtein(&query, name),
            })
            .filter(|m| m.score >= floor)
            .collect();

        // Stable sort keeps index order among equal scores
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches
    }

    /// "Did you mean" lines for a phrase that did not match: landmarks scoring
    /// in the secondary band, formatted `"<name> - <neighborhood>"`.
    pub fn suggestions(&self, query: &str, index: &LandmarkIndex) -> Vec<String> {
        self.ranked(query, index, self.suggestion_floor)
            .into_iter()
            .filter(|m| m.score < self.min_score)
            .take(self.suggestion_limit)
            .map(|m| display_line(m.landmark))
            .collect()
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(0.6, 0.3, 5)
    }
}
