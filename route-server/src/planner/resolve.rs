//! Landmark-to-landmark route resolution.
//!
//! Structured path: lookup → common base routes → direction check →
//! transfer fallback. The free-text path first extracts two phrases and
//! fuzzy-matches them to landmarks, then runs the structured path.

use tracing::{debug, info};

use crate::domain::normalize;
use crate::landmarks::{FuzzyMatcher, display_line};
use crate::query::QueryParser;
use crate::snapshot::Snapshot;

use super::config::ResolverConfig;
use super::format;
use super::proximity::find_common_routes;
use super::result::{
    Reason, ResolutionResult, RouteSuggestion, Status, Suggestion, TransferSuggestion,
};
use super::sequence::validate;
use super::transfer::find_transfers;

/// Resolves queries against one snapshot.
///
/// Cheap to construct; build one per request from the currently published
/// snapshot.
pub struct Resolver<'a> {
    snapshot: &'a Snapshot,
    config: &'a ResolverConfig,
    parser: &'a QueryParser,
    matcher: FuzzyMatcher,
}

impl<'a> Resolver<'a> {
    pub fn new(
        snapshot: &'a Snapshot,
        config: &'a ResolverConfig,
        parser: &'a QueryParser,
    ) -> Self {
        Self {
            snapshot,
            config,
            parser,
            matcher: config.matcher(),
        }
    }

    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    pub fn config(&self) -> &'a ResolverConfig {
        self.config
    }

    /// Resolve a route between two landmark names.
    pub fn resolve(&self, start: &str, end: &str) -> ResolutionResult {
        let (start, end) = (start.trim(), end.trim());
        if start.is_empty() || end.is_empty() {
            return ResolutionResult::new(Status::Error, format::missing_input())
                .with_reason(Reason::MissingInput);
        }

        if normalize(start) == normalize(end) {
            debug!(%start, "start and end are the same landmark");
            return ResolutionResult::new(Status::SelfMatch, format::self_match(start))
                .with_endpoints(Some(start), Some(end));
        }

        let index = &self.snapshot.index;
        let Some(start_landmark) = index.lookup(start) else {
            return ResolutionResult::new(Status::NotFound, format::unknown_start(start))
                .with_reason(Reason::UnknownStart)
                .with_unresolved(self.matcher.suggestions(start, index));
        };
        let Some(end_landmark) = index.lookup(end) else {
            return ResolutionResult::new(Status::NotFound, format::unknown_end(end))
                .with_reason(Reason::UnknownEnd)
                .with_endpoints(Some(&start_landmark.name), None)
                .with_unresolved(self.matcher.suggestions(end, index));
        };

        let start_name = start_landmark.name.as_str();
        let end_name = end_landmark.name.as_str();
        info!(start = %start_name, end = %end_name, "resolving route");

        let candidates = find_common_routes(start_landmark, end_landmark, self.config);
        let direct: Vec<Suggestion> = candidates
            .iter()
            .flat_map(|c| validate(c, &self.snapshot.routes))
            .map(|v| Suggestion::Direct(RouteSuggestion::from(&v)))
            .collect();

        if !direct.is_empty() {
            let message = format::direct_found(direct.len());
            let mut result = ResolutionResult::new(Status::DirectFound, message)
                .with_endpoints(Some(start_name), Some(end_name));
            result.suggestions = direct;
            return result;
        }

        let transfers: Vec<Suggestion> = find_transfers(
            start_name,
            end_name,
            &self.snapshot.routes,
            self.config.max_transfers,
        )
        .iter()
        .map(|t| Suggestion::Transfer(TransferSuggestion::from(t)))
        .collect();

        if !transfers.is_empty() {
            let message = format::transfer_found(transfers.len());
            let mut result = ResolutionResult::new(Status::TransferFound, message)
                .with_endpoints(Some(start_name), Some(end_name));
            result.suggestions = transfers;
            return result;
        }

        let (reason, message) = if candidates.is_empty() {
            (Reason::NoCommonRoute, format::no_common_route(start_name, end_name))
        } else {
            (Reason::NoValidSequence, format::no_valid_sequence(start_name, end_name))
        };
        info!(start = %start_name, end = %end_name, ?reason, "no route found");
        ResolutionResult::new(Status::NotFound, message)
            .with_reason(reason)
            .with_endpoints(Some(start_name), Some(end_name))
    }

    /// Resolve a route from a free-text question.
    pub fn resolve_from_text(&self, text: &str) -> ResolutionResult {
        if text.trim().is_empty() {
            return ResolutionResult::new(Status::Error, format::missing_input())
                .with_reason(Reason::MissingInput);
        }

        let (start_phrase, end_phrase) = self.parser.extract(text);
        if start_phrase.is_none() && end_phrase.is_none() {
            debug!(%text, "no query pattern matched");
            return ResolutionResult::new(Status::Error, format::ambiguous_query())
                .with_reason(Reason::AmbiguousQuery);
        }

        let index = &self.snapshot.index;
        let start_match = start_phrase
            .as_deref()
            .and_then(|p| self.matcher.find_best_match(p, index));
        let end_match = end_phrase
            .as_deref()
            .and_then(|p| self.matcher.find_best_match(p, index));

        debug!(
            ?start_phrase,
            ?end_phrase,
            start = ?start_match.map(|m| (&m.landmark.name, m.score)),
            end = ?end_match.map(|m| (&m.landmark.name, m.score)),
            "fuzzy matched phrases"
        );

        match (start_match, end_match) {
            (Some(s), Some(e)) => self.resolve(&s.landmark.name, &e.landmark.name),
            (None, None) => {
                let mut suggestions = Vec::new();
                for phrase in start_phrase.iter().chain(end_phrase.iter()) {
                    for line in self.matcher.suggestions(phrase, index) {
                        if !suggestions.contains(&line) {
                            suggestions.push(line);
                        }
                    }
                }
                suggestions.truncate(self.config.suggestion_limit);

                let phrase = start_phrase
                    .as_deref()
                    .or(end_phrase.as_deref())
                    .unwrap_or_default();
                ResolutionResult::new(Status::NotFound, format::unresolved_phrase(phrase))
                    .with_reason(Reason::UnresolvedPhrase)
                    .with_unresolved(suggestions)
            }
            (start, end) => {
                let start_name = start.map(|m| m.landmark.name.as_str());
                let end_name = end.map(|m| m.landmark.name.as_str());
                let message = format::partial_match(start_name, end_name);
                let mut result = ResolutionResult::new(Status::PartialMatch, message)
                    .with_endpoints(start_name, end_name);

                // A phrase was given but did not resolve
                let missed = if start.is_none() { &start_phrase } else { &end_phrase };
                if let Some(phrase) = missed {
                    result = result
                        .with_reason(Reason::UnresolvedPhrase)
                        .with_unresolved(self.matcher.suggestions(phrase, index));
                }
                result
            }
        }
    }

    /// Landmark search for pickers: fuzzy matches first, then names containing
    /// the query. Lines are formatted `"<name> - <neighborhood>"`.
    pub fn search_landmarks(&self, query: &str, limit: usize) -> Vec<String> {
        let index = &self.snapshot.index;
        let mut lines: Vec<String> = self
            .matcher
            .ranked(query, index, self.config.suggestion_floor)
            .into_iter()
            .map(|m| display_line(m.landmark))
            .collect();

        for line in index.containing(query, limit) {
            if !lines.contains(&line) {
                lines.push(line);
            }
        }

        lines.truncate(limit);
        lines
    }
}
