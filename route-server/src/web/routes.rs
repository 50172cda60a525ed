//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::cache::QueryKey;
use crate::conversation::{self, TransitionError};
use crate::dataset::DatasetError;
use crate::planner::{ResolutionResult, Resolver};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/resolve", get(resolve))
        .route("/api/resolve/text", get(resolve_text))
        .route("/api/landmarks/search", get(search_landmarks))
        .route("/api/neighborhoods", get(neighborhoods))
        .route("/api/snapshot", get(snapshot_info))
        .route("/api/snapshot/reload", post(reload_snapshot))
        .route("/api/conversation", post(converse))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the query forms.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.snapshots.current().await;
    let template = IndexTemplate {
        neighborhoods: snapshot
            .index
            .neighborhoods()
            .into_iter()
            .map(str::to_string)
            .collect(),
        landmark_count: snapshot.index.len(),
        route_count: snapshot.routes.len(),
    };
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html))
}

/// Resolve a structured start/end pair.
async fn resolve(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<ResolveRequest>,
) -> Result<Response, AppError> {
    let snapshot = state.snapshots.current().await;
    let resolver = Resolver::new(&snapshot, &state.config, &state.parser);

    let result = state
        .cache
        .get_or_resolve(
            snapshot.generation,
            QueryKey::pair(&req.start, &req.end),
            || resolver.resolve(&req.start, &req.end),
        )
        .await;

    respond(&state, &headers, &result)
}

/// Resolve a free-text question.
async fn resolve_text(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<TextQueryRequest>,
) -> Result<Response, AppError> {
    let snapshot = state.snapshots.current().await;
    let resolver = Resolver::new(&snapshot, &state.config, &state.parser);

    let result = state
        .cache
        .get_or_resolve(snapshot.generation, QueryKey::text(&req.q), || {
            resolver.resolve_from_text(&req.q)
        })
        .await;

    respond(&state, &headers, &result)
}

/// Return HTML or JSON based on the Accept header.
fn respond(
    state: &AppState,
    headers: &HeaderMap,
    result: &ResolutionResult,
) -> Result<Response, AppError> {
    if accepts_html(headers) {
        let template = ResolutionTemplate {
            result: ResolutionView::from_result(result, state.config.transfer_points_shown),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(result.clone()).into_response())
    }
}

/// Check if the client prefers HTML responses.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Search landmarks by partial or misspelled name.
async fn search_landmarks(
    State(state): State<AppState>,
    Query(req): Query<LandmarkSearchRequest>,
) -> Result<Json<LandmarkSearchResponse>, AppError> {
    if req.q.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "Query must not be empty".to_string(),
        });
    }
    let limit = req.limit.unwrap_or(10).min(50);

    let snapshot = state.snapshots.current().await;
    let resolver = Resolver::new(&snapshot, &state.config, &state.parser);
    let landmarks = resolver.search_landmarks(&req.q, limit);

    Ok(Json(LandmarkSearchResponse { landmarks }))
}

/// The neighborhood → category → landmark tree.
async fn neighborhoods(State(state): State<AppState>) -> Json<NeighborhoodsResponse> {
    let snapshot = state.snapshots.current().await;
    Json(NeighborhoodsResponse::from_index(&snapshot.index))
}

async fn snapshot_info(State(state): State<AppState>) -> Json<SnapshotInfo> {
    let snapshot = state.snapshots.current().await;
    Json(SnapshotInfo::from_snapshot(&snapshot))
}

/// Reload the dataset from its source and publish a new snapshot.
async fn reload_snapshot(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let generation = state.snapshots.refresh().await?;
    state.cache.invalidate_all();
    info!(generation, "snapshot reloaded on request");

    Ok(Json(ReloadResponse { generation }))
}

/// Apply one conversation input.
async fn converse(
    State(state): State<AppState>,
    Json(req): Json<ConversationRequest>,
) -> Result<Json<conversation::Step>, AppError> {
    let snapshot = state.snapshots.current().await;
    let resolver = Resolver::new(&snapshot, &state.config, &state.parser);
    let step = conversation::advance(&req.state, req.input, &resolver)?;

    Ok(Json(step))
}

// ============================================================================
// Error handling
// ============================================================================

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<DatasetError> for AppError {
    fn from(e: DatasetError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<TransitionError> for AppError {
    fn from(e: TransitionError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
