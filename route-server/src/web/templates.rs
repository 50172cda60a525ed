//! Askama templates for the web frontend.

use askama::Template;

use crate::planner::{ResolutionResult, RouteSuggestion, TransferSuggestion};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the query forms.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub neighborhoods: Vec<String>,
    pub landmark_count: usize,
    pub route_count: usize,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Resolution result fragment.
#[derive(Template)]
#[template(path = "resolution.html")]
pub struct ResolutionTemplate {
    pub result: ResolutionView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Resolution view model for templates.
#[derive(Debug, Clone)]
pub struct ResolutionView {
    /// Status code, used as a CSS class
    pub status: String,
    pub message: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub direct: Vec<RouteSuggestion>,
    pub transfers: Vec<TransferView>,
    pub unresolved: Vec<String>,
}

/// Transfer view with the transfer points already cut to the shown count.
#[derive(Debug, Clone)]
pub struct TransferView {
    pub first_route: String,
    pub second_route: String,
    pub transfer_points: Vec<String>,
    pub hidden_points: usize,
    pub combined_fare: String,
}

impl TransferView {
    fn from_suggestion(t: &TransferSuggestion, shown: usize) -> Self {
        Self {
            first_route: t.first_route.clone(),
            second_route: t.second_route.clone(),
            transfer_points: t.transfer_points.iter().take(shown).cloned().collect(),
            hidden_points: t.transfer_points.len().saturating_sub(shown),
            combined_fare: t.combined_fare.clone(),
        }
    }
}

impl ResolutionView {
    /// Create from a result, showing at most `points_shown` transfer points
    /// per transfer.
    pub fn from_result(result: &ResolutionResult, points_shown: usize) -> Self {
        let status = serde_json::to_value(result.status)
            .ok()
            .and_then(|v| v.as_str().map(str::to_lowercase))
            .unwrap_or_default();

        Self {
            status,
            message: result.message.clone(),
            start: result.start.clone(),
            end: result.end.clone(),
            direct: result.direct_routes().cloned().collect(),
            transfers: result
                .transfers()
                .map(|t| TransferView::from_suggestion(t, points_shown))
                .collect(),
            unresolved: result.unresolved_suggestions.clone(),
        }
    }
}
