//! Name normalization.
//!
//! Landmark names, stop names and free-text phrases are all compared in
//! normalized form: surrounding whitespace trimmed, inner whitespace runs
//! collapsed to a single space, and case-folded.

/// Normalize a name for comparison.
///
/// # Examples
///
/// ```
/// use route_server::domain::normalize;
///
/// assert_eq!(normalize("  Main   Square "), "main square");
/// assert_eq!(normalize("المستشفى  العام"), "المستشفى العام");
/// ```
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether `haystack` contains `needle`, both compared in normalized form.
///
/// An empty needle never matches.
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    let needle = normalize(needle);
    !needle.is_empty() && normalize(haystack).contains(&needle)
}
