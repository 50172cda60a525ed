//! Base routes shared by two landmarks.

use tracing::{debug, warn};

use crate::domain::{Landmark, ProximityEntry};

use super::config::ResolverConfig;

/// A base route serving both landmarks at acceptable proximity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateBase<'a> {
    pub base_name: &'a str,
    pub start_entry: &'a ProximityEntry,
    pub end_entry: &'a ProximityEntry,
    /// Where to board, from the start landmark's entry.
    pub start_stop: &'a str,
    /// Where to alight, from the end landmark's entry.
    pub end_stop: &'a str,
}

/// Find base routes listed by both landmarks.
///
/// A base route qualifies only if both proximity tiers are acceptable and both
/// entries name a nearest stop. Results follow `start.served_by` order.
pub fn find_common_routes<'a>(
    start: &'a Landmark,
    end: &'a Landmark,
    config: &ResolverConfig,
) -> Vec<CandidateBase<'a>> {
    if start.served_by.is_empty() {
        warn!(landmark = %start.name, "start landmark is not linked to any route");
    }
    if end.served_by.is_empty() {
        warn!(landmark = %end.name, "end landmark is not linked to any route");
    }

    let mut candidates = Vec::new();

    for (base_name, start_entry) in &start.served_by {
        let Some(end_entry) = end.served_by.get(base_name) else {
            continue;
        };

        if !config.is_acceptable(start_entry.proximity)
            || !config.is_acceptable(end_entry.proximity)
        {
            debug!(
                base = %base_name,
                start = %start_entry.proximity.as_str(),
                end = %end_entry.proximity.as_str(),
                "proximity not acceptable"
            );
            continue;
        }

        let (Some(start_stop), Some(end_stop)) =
            (start_entry.nearest_stop(), end_entry.nearest_stop())
        else {
            warn!(
                base = %base_name,
                start = %start.name,
                end = %end.name,
                "missing nearest stop, cannot check direction"
            );
            continue;
        };

        debug!(base = %base_name, %start_stop, %end_stop, "common base route");
        candidates.push(CandidateBase {
            base_name,
            start_entry,
            end_entry,
            start_stop,
            end_stop,
        });
    }

    candidates
}
