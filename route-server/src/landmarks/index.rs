//! Normalized landmark lookup.

use indexmap::IndexMap;
use tracing::warn;

use crate::domain::{Landmark, normalize};

/// Landmark table keyed by normalized name.
///
/// Iteration follows insertion order, which makes fuzzy tie-breaking and the
/// browsing tree deterministic.
#[derive(Debug, Clone, Default)]
pub struct LandmarkIndex {
    by_name: IndexMap<String, Landmark>,
}

impl LandmarkIndex {
    /// Build the index. Later records whose normalized name collides with an
    /// earlier one are dropped with a warning.
    pub fn build(landmarks: impl IntoIterator<Item = Landmark>) -> Self {
        let mut by_name = IndexMap::new();
        for landmark in landmarks {
            let key = normalize(&landmark.name);
            if key.is_empty() {
                warn!(neighborhood = %landmark.neighborhood, "skipping landmark with empty name");
                continue;
            }
            if by_name.contains_key(&key) {
                warn!(name = %landmark.name, "duplicate landmark name, keeping first record");
                continue;
            }
            by_name.insert(key, landmark);
        }
        Self { by_name }
    }

    /// Look up a landmark by name (trimmed, whitespace-collapsed, case-folded).
    pub fn lookup(&self, name: &str) -> Option<&Landmark> {
        self.by_name.get(&normalize(name))
    }

    pub(crate) fn lookup_mut(&mut self, name: &str) -> Option<&mut Landmark> {
        self.by_name.get_mut(&normalize(name))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Landmarks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.by_name.values()
    }

    /// `(normalized name, landmark)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Landmark)> {
        self.by_name.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Distinct neighborhoods in first-seen order.
    pub fn neighborhoods(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for landmark in self.iter() {
            let n = landmark.neighborhood.as_str();
            if !seen.iter().any(|s| normalize(s) == normalize(n)) {
                seen.push(n);
            }
        }
        seen
    }

    /// Distinct categories within a neighborhood, in first-seen order.
    pub fn categories(&self, neighborhood: &str) -> Vec<&str> {
        let wanted = normalize(neighborhood);
        let mut seen: Vec<&str> = Vec::new();
        for landmark in self
            .iter()
            .filter(|l| normalize(&l.neighborhood) == wanted)
        {
            let c = landmark.category.as_str();
            if !seen.iter().any(|s| normalize(s) == normalize(c)) {
                seen.push(c);
            }
        }
        seen
    }

    /// Landmarks in a neighborhood and category, in insertion order.
    pub fn landmarks_in(&self, neighborhood: &str, category: &str) -> Vec<&Landmark> {
        let neighborhood = normalize(neighborhood);
        let category = normalize(category);
        self.iter()
            .filter(|l| {
                normalize(&l.neighborhood) == neighborhood && normalize(&l.category) == category
            })
            .collect()
    }

    /// Names containing `fragment`, formatted `"<name> - <neighborhood>"`.
    pub fn containing(&self, fragment: &str, limit: usize) -> Vec<String> {
        let fragment = normalize(fragment);
        if fragment.is_empty() {
            return Vec::new();
        }
        let mut out: Vec<String> = Vec::new();
        for (key, landmark) in self.entries() {
            if out.len() >= limit {
                break;
            }
            if key.contains(&fragment) {
                let line = display_line(landmark);
                if !out.contains(&line) {
                    out.push(line);
                }
            }
        }
        out
    }
}

/// `"<name> - <neighborhood>"`, the form used in suggestion lists.
pub fn display_line(landmark: &Landmark) -> String {
    format!("{} - {}", landmark.name, landmark.neighborhood)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LandmarkIndex {
        LandmarkIndex::build(vec![
            Landmark::new("المستشفى العام", "الشرق", "مستشفيات"),
            Landmark::new("مستشفى التضامن", "الشرق", "مستشفيات"),
            Landmark::new("الجامعة", "الزهور", "تعليم"),
            Landmark::new("مدرسة الزهور", "الزهور", "تعليم"),
            Landmark::new("نادي المصري", "الزهور", "رياضة"),
        ])
    }

    #[test]
    fn lookup_is_normalized() {
        let index = sample();
        assert_eq!(index.len(), 5);
        assert!(index.lookup("  المستشفى   العام ").is_some());
        assert!(index.lookup("الجامعة").is_some());
        assert!(index.lookup("جامعة").is_none());
    }

    #[test]
    fn latin_lookup_is_case_folded() {
        let index = LandmarkIndex::build(vec![Landmark::new("Port Fouad Ferry", "North", "Transit")]);
        assert!(index.lookup("port fouad ferry").is_some());
        assert!(index.lookup("PORT FOUAD FERRY").is_some());
    }

    #[test]
    fn duplicates_keep_first() {
        let index = LandmarkIndex::build(vec![
            Landmark::new("الجامعة", "الزهور", "تعليم"),
            Landmark::new(" الجامعة ", "الشرق", "أخرى"),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("الجامعة").unwrap().neighborhood, "الزهور");
    }

    #[test]
    fn empty_names_are_skipped() {
        let index = LandmarkIndex::build(vec![Landmark::new("  ", "x", "y")]);
        assert!(index.is_empty());
    }

    #[test]
    fn browsing_tree_is_ordered() {
        let index = sample();
        assert_eq!(index.neighborhoods(), vec!["الشرق", "الزهور"]);
        assert_eq!(index.categories("الزهور"), vec!["تعليم", "رياضة"]);
        let names: Vec<&str> = index
            .landmarks_in("الزهور", "تعليم")
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["الجامعة", "مدرسة الزهور"]);
        assert!(index.categories("غير موجود").is_empty());
    }

    #[test]
    fn containing_formats_and_limits() {
        let index = sample();
        assert_eq!(
            index.containing("مستشفى", 10),
            vec!["المستشفى العام - الشرق", "مستشفى التضامن - الشرق"]
        );
        assert_eq!(index.containing("مستشفى", 1).len(), 1);
        assert!(index.containing("", 10).is_empty());
    }
}
