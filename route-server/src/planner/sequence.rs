//! Direction check for candidate routes.
//!
//! A route variant only helps if it reaches the boarding stop before the
//! alighting stop in its recorded stop order. Loop routes usually come as two
//! variants (inner/outer) running opposite ways, so every variant is checked.

use tracing::{debug, warn};

use crate::domain::Route;

use super::proximity::CandidateBase;

/// A route variant that passes the boarding stop before the alighting stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedRoute<'a> {
    pub route: &'a Route,
    pub candidate: CandidateBase<'a>,
    /// Index into `route.stops` where the rider boards.
    pub boarding_index: usize,
    /// Index into `route.stops` where the rider alights.
    /// Always greater than `boarding_index`.
    pub alighting_index: usize,
}

/// Check every variant of the candidate's base route.
///
/// Returns all variants with a forward-ordered occurrence of both stops, in
/// route table order.
pub fn validate<'a>(candidate: &CandidateBase<'a>, routes: &'a [Route]) -> Vec<ValidatedRoute<'a>> {
    let variants: Vec<&Route> = routes
        .iter()
        .filter(|r| r.is_variant_of(candidate.base_name))
        .collect();

    if variants.is_empty() {
        warn!(base = %candidate.base_name, "no route definitions for base name");
        return Vec::new();
    }

    let mut valid = Vec::new();

    for route in variants {
        let starts = route.stop_indices(candidate.start_stop);
        let ends = route.stop_indices(candidate.end_stop);

        if starts.is_empty() {
            warn!(route = %route.name, stop = %candidate.start_stop, "boarding stop not on route");
        }
        if ends.is_empty() {
            warn!(route = %route.name, stop = %candidate.end_stop, "alighting stop not on route");
        }

        match forward_pair(&starts, &ends) {
            Some((boarding_index, alighting_index)) => {
                debug!(route = %route.name, boarding_index, alighting_index, "valid direction");
                valid.push(ValidatedRoute {
                    route,
                    candidate: *candidate,
                    boarding_index,
                    alighting_index,
                });
            }
            None => debug!(route = %route.name, ?starts, ?ends, "wrong direction"),
        }
    }

    if valid.is_empty() {
        warn!(base = %candidate.base_name, "no variant has a valid stop sequence");
    }

    valid
}

/// Earliest boarding index that has a later alighting index, paired with the
/// first such alighting index. Both slices must be ascending.
pub fn forward_pair(starts: &[usize], ends: &[usize]) -> Option<(usize, usize)> {
    starts
        .iter()
        .find_map(|&s| ends.iter().find(|&&e| e > s).map(|&e| (s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Fare, Proximity, ProximityEntry};

    fn route(name: &str, stops: &[&str]) -> Route {
        Route::new(
            name,
            Fare::new("5 جنيه"),
            stops.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn candidate<'a>(
        base: &'a str,
        entry: &'a ProximityEntry,
        start: &'a str,
        end: &'a str,
    ) -> CandidateBase<'a> {
        CandidateBase {
            base_name: base,
            start_entry: entry,
            end_entry: entry,
            start_stop: start,
            end_stop: end,
        }
    }

    #[test]
    fn forward_pair_cases() {
        assert_eq!(forward_pair(&[0], &[3]), Some((0, 3)));
        assert_eq!(forward_pair(&[3], &[0]), None);
        assert_eq!(forward_pair(&[2, 5], &[1, 4, 6]), Some((2, 4)));
        assert_eq!(forward_pair(&[4, 5], &[1, 6]), Some((4, 6)));
        assert_eq!(forward_pair(&[1], &[1]), None);
        assert_eq!(forward_pair(&[], &[1]), None);
        assert_eq!(forward_pair(&[1], &[]), None);
    }

    #[test]
    fn forward_route_is_valid() {
        let routes = vec![route("R1", &["A", "B", "C", "D"])];
        let entry = ProximityEntry::new(Proximity::VeryNear, "A");
        let valid = validate(&candidate("R1", &entry, "A", "D"), &routes);

        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].route.name, "R1");
        assert_eq!((valid[0].boarding_index, valid[0].alighting_index), (0, 3));
    }

    #[test]
    fn reverse_direction_is_rejected() {
        let routes = vec![route("R1", &["A", "B", "C", "D"])];
        let entry = ProximityEntry::new(Proximity::VeryNear, "D");
        assert!(validate(&candidate("R1", &entry, "D", "A"), &routes).is_empty());
    }

    #[test]
    fn all_valid_variants_are_kept() {
        let routes = vec![
            route("خط 7 (داخلي)", &["الميناء", "الجامعة", "المستشفى", "الميناء"]),
            route("خط 7 (خارجي)", &["المستشفى", "الجامعة", "الميناء"]),
            route("خط 8", &["الجامعة", "المستشفى"]),
        ];
        let entry = ProximityEntry::new(Proximity::Medium, "الميناء");
        let valid = validate(&candidate("خط 7", &entry, "الميناء", "المستشفى"), &routes);

        let names: Vec<&str> = valid.iter().map(|v| v.route.name.as_str()).collect();
        assert_eq!(names, vec!["خط 7 (داخلي)"]);

        let entry = ProximityEntry::new(Proximity::Medium, "الجامعة");
        let valid = validate(&candidate("خط 7", &entry, "الجامعة", "الميناء"), &routes);
        let names: Vec<&str> = valid.iter().map(|v| v.route.name.as_str()).collect();
        assert_eq!(names, vec!["خط 7 (داخلي)", "خط 7 (خارجي)"]);
    }

    #[test]
    fn stop_match_is_case_and_space_insensitive() {
        let routes = vec![route("Line 1", &[" Main  Square ", "Harbour Gate"])];
        let entry = ProximityEntry::new(Proximity::VeryNear, "main square");
        let valid = validate(&candidate("Line 1", &entry, "MAIN SQUARE", "harbour"), &routes);
        assert_eq!(valid.len(), 1);
    }

    #[test]
    fn missing_stop_rejects_variant() {
        let routes = vec![route("R1", &["A", "B"])];
        let entry = ProximityEntry::new(Proximity::VeryNear, "A");
        assert!(validate(&candidate("R1", &entry, "A", "Z"), &routes).is_empty());
    }

    #[test]
    fn unknown_base_yields_nothing() {
        let routes = vec![route("R1", &["A", "B"])];
        let entry = ProximityEntry::new(Proximity::VeryNear, "A");
        assert!(validate(&candidate("R9", &entry, "A", "B"), &routes).is_empty());
    }
}
