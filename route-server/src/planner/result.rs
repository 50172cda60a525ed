//! Resolution results.
//!
//! A [`ResolutionResult`] is built per query and never persisted. Per-query
//! failures (unknown landmark, no route) are statuses with a reason code, not
//! errors.

use serde::Serialize;

use crate::domain::Proximity;

use super::sequence::ValidatedRoute;
use super::transfer::TransferOption;

/// Outcome class of a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Start and end are the same landmark.
    SelfMatch,
    DirectFound,
    TransferFound,
    /// Free text named only one landmark that could be resolved.
    PartialMatch,
    NotFound,
    Error,
}

/// Why a resolution did not produce routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reason {
    MissingInput,
    UnknownStart,
    UnknownEnd,
    /// The landmarks share no base route at acceptable proximity.
    NoCommonRoute,
    /// Shared base routes exist but none runs in the right direction.
    NoValidSequence,
    AmbiguousQuery,
    UnresolvedPhrase,
}

/// A single route taking the rider from start to end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSuggestion {
    pub route_name: String,
    pub base_name: String,
    pub fare: String,
    pub notes: Option<String>,
    pub boarding_stop: String,
    pub alighting_stop: String,
    pub boarding_index: usize,
    pub alighting_index: usize,
    pub start_proximity: Proximity,
    pub end_proximity: Proximity,
}

impl From<&ValidatedRoute<'_>> for RouteSuggestion {
    fn from(v: &ValidatedRoute<'_>) -> Self {
        Self {
            route_name: v.route.name.clone(),
            base_name: v.candidate.base_name.to_string(),
            fare: v.route.fare.label().to_string(),
            notes: v.route.notes.clone(),
            boarding_stop: v.route.stops[v.boarding_index].clone(),
            alighting_stop: v.route.stops[v.alighting_index].clone(),
            boarding_index: v.boarding_index,
            alighting_index: v.alighting_index,
            start_proximity: v.candidate.start_entry.proximity,
            end_proximity: v.candidate.end_entry.proximity,
        }
    }
}

/// Two routes joined at one of several shared stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferSuggestion {
    pub first_route: String,
    pub second_route: String,
    pub transfer_points: Vec<String>,
    pub combined_fare: String,
}

impl From<&TransferOption<'_>> for TransferSuggestion {
    fn from(t: &TransferOption<'_>) -> Self {
        Self {
            first_route: t.first.name.clone(),
            second_route: t.second.name.clone(),
            transfer_points: t.transfer_points.iter().map(|p| p.to_string()).collect(),
            combined_fare: t.combined_fare(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Suggestion {
    Direct(RouteSuggestion),
    Transfer(TransferSuggestion),
}

impl Suggestion {
    pub fn as_direct(&self) -> Option<&RouteSuggestion> {
        match self {
            Suggestion::Direct(r) => Some(r),
            Suggestion::Transfer(_) => None,
        }
    }

    pub fn as_transfer(&self) -> Option<&TransferSuggestion> {
        match self {
            Suggestion::Direct(_) => None,
            Suggestion::Transfer(t) => Some(t),
        }
    }
}

/// The answer to one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionResult {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,

    /// Resolved start landmark name.
    pub start: Option<String>,

    /// Resolved end landmark name.
    pub end: Option<String>,

    /// Direct suggestions first, then transfers.
    pub suggestions: Vec<Suggestion>,

    /// "Did you mean" lines for a phrase or name that did not resolve.
    pub unresolved_suggestions: Vec<String>,

    /// User-facing Arabic message.
    pub message: String,
}

impl ResolutionResult {
    pub(crate) fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            reason: None,
            start: None,
            end: None,
            suggestions: Vec::new(),
            unresolved_suggestions: Vec::new(),
            message: message.into(),
        }
    }

    pub(crate) fn with_reason(mut self, reason: Reason) -> Self {
        self.reason = Some(reason);
        self
    }

    pub(crate) fn with_endpoints(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start = start.map(str::to_string);
        self.end = end.map(str::to_string);
        self
    }

    pub(crate) fn with_unresolved(mut self, suggestions: Vec<String>) -> Self {
        self.unresolved_suggestions = suggestions;
        self
    }

    /// Whether at least one route was suggested.
    pub fn is_found(&self) -> bool {
        matches!(self.status, Status::DirectFound | Status::TransferFound)
    }

    pub fn direct_routes(&self) -> impl Iterator<Item = &RouteSuggestion> {
        self.suggestions.iter().filter_map(Suggestion::as_direct)
    }

    pub fn transfers(&self) -> impl Iterator<Item = &TransferSuggestion> {
        self.suggestions.iter().filter_map(Suggestion::as_transfer)
    }
}
