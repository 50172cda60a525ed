//! Two-leg fallback search.
//!
//! Used only when no direct route validates. Pairs a route serving the start
//! with a route serving the end, provided the two share at least one stop.

use tracing::debug;

use crate::domain::{Route, normalize};

/// A two-leg journey: ride `first`, change at a transfer point, ride `second`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferOption<'a> {
    pub first: &'a Route,
    pub second: &'a Route,
    /// Stops of `first` that also appear on `second`, in `first`'s order.
    pub transfer_points: Vec<&'a str>,
}

impl TransferOption<'_> {
    /// Both fares side by side, e.g. `"5 جنيه + 3 جنيه"`.
    pub fn combined_fare(&self) -> String {
        self.first.fare.combine(&self.second.fare)
    }
}

/// Find up to `limit` transfer options, in discovery order.
///
/// Every ordered pair of distinct route records is tried: the first route
/// must have a stop containing `start_name`, the second one containing
/// `end_name`.
pub fn find_transfers<'a>(
    start_name: &str,
    end_name: &str,
    routes: &'a [Route],
    limit: usize,
) -> Vec<TransferOption<'a>> {
    let mut options = Vec::new();
    if limit == 0 {
        return options;
    }

    for (i, first) in routes.iter().enumerate() {
        if !first.serves(start_name) {
            continue;
        }
        for (j, second) in routes.iter().enumerate() {
            if i == j || !second.serves(end_name) {
                continue;
            }

            let transfer_points = shared_stops(first, second);
            if transfer_points.is_empty() {
                continue;
            }

            debug!(first = %first.name, second = %second.name, ?transfer_points, "transfer option");
            options.push(TransferOption {
                first,
                second,
                transfer_points,
            });
            if options.len() >= limit {
                return options;
            }
        }
    }

    options
}

/// Stops of `first` that connect to some stop of `second`, without repeats.
fn shared_stops<'a>(first: &'a Route, second: &Route) -> Vec<&'a str> {
    let mut points: Vec<&'a str> = Vec::new();
    for p1 in &first.stops {
        if points.contains(&p1.as_str()) {
            continue;
        }
        if second.stops.iter().any(|p2| stops_connect(p1, p2)) {
            points.push(p1);
        }
    }
    points
}

/// Two stop names denote the same place: equal when normalized, or both
/// longer than five characters and one containing the other.
pub fn stops_connect(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b || (a.chars().count() > 5 && b.chars().count() > 5 && (a.contains(&b) || b.contains(&a)))
}
