//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::conversation::{ConversationState, Input};
use crate::landmarks::LandmarkIndex;
use crate::snapshot::{IntegrityIssue, Snapshot};

/// Structured resolution request.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    /// Start landmark name
    #[serde(default)]
    pub start: String,

    /// Destination landmark name
    #[serde(default)]
    pub end: String,
}

/// Free-text resolution request.
#[derive(Debug, Deserialize)]
pub struct TextQueryRequest {
    #[serde(default)]
    pub q: String,
}

/// Landmark search request.
#[derive(Debug, Deserialize)]
pub struct LandmarkSearchRequest {
    /// Search query (partial name, typos allowed)
    pub q: String,

    /// Maximum results (default 10, capped at 50)
    pub limit: Option<usize>,
}

/// Landmark search response.
#[derive(Debug, Serialize)]
pub struct LandmarkSearchResponse {
    /// Lines formatted `"<name> - <neighborhood>"`
    pub landmarks: Vec<String>,
}

/// The browsing tree.
#[derive(Debug, Serialize)]
pub struct NeighborhoodsResponse {
    pub neighborhoods: Vec<NeighborhoodDto>,
}

#[derive(Debug, Serialize)]
pub struct NeighborhoodDto {
    pub name: String,
    pub categories: Vec<CategoryDto>,
}

#[derive(Debug, Serialize)]
pub struct CategoryDto {
    pub name: String,
    pub landmarks: Vec<String>,
}

impl NeighborhoodsResponse {
    pub fn from_index(index: &LandmarkIndex) -> Self {
        let neighborhoods = index
            .neighborhoods()
            .into_iter()
            .map(|n| NeighborhoodDto {
                name: n.to_string(),
                categories: index
                    .categories(n)
                    .into_iter()
                    .map(|c| CategoryDto {
                        name: c.to_string(),
                        landmarks: index
                            .landmarks_in(n, c)
                            .into_iter()
                            .map(|l| l.name.clone())
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        Self { neighborhoods }
    }
}

/// Summary of the published snapshot.
#[derive(Debug, Serialize)]
pub struct SnapshotInfo {
    pub generation: u64,
    /// RFC 3339 load time
    pub loaded_at: String,
    pub landmarks: usize,
    pub routes: usize,
    pub base_routes: Vec<String>,
    pub integrity_issues: Vec<IntegrityIssue>,
}

impl SnapshotInfo {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            generation: snapshot.generation,
            loaded_at: snapshot.loaded_at.to_rfc3339(),
            landmarks: snapshot.index.len(),
            routes: snapshot.routes.len(),
            base_routes: snapshot
                .base_routes()
                .into_iter()
                .map(str::to_string)
                .collect(),
            integrity_issues: snapshot.integrity_issues.clone(),
        }
    }
}

/// Response to a snapshot reload.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub generation: u64,
}

/// One conversation input; a missing state starts at the main menu.
#[derive(Debug, Deserialize)]
pub struct ConversationRequest {
    #[serde(default)]
    pub state: ConversationState,
    pub input: Input,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
