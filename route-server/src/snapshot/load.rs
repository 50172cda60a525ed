//! Building a snapshot from dataset tables.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{Landmark, Proximity, ProximityEntry, Route, normalize};
use crate::landmarks::LandmarkIndex;

/// Fatal dataset problems. Any of these aborts the load.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("dataset contains no routes")]
    NoRoutes,

    #[error("route #{index} has an empty name")]
    EmptyRouteName { index: usize },

    #[error("route {name:?} has no stops")]
    NoStops { name: String },

    #[error("duplicate route name {name:?}")]
    DuplicateRoute { name: String },

    #[error("landmark #{index} has an empty name")]
    EmptyLandmarkName { index: usize },
}

/// A landmark ↔ base route association from the link table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityLink {
    pub landmark_name: String,
    pub base_route_name: String,
    pub proximity: Proximity,
    #[serde(default)]
    pub nearest_stop: Option<String>,
}

/// A non-fatal inconsistency found while loading.
///
/// These are logged and kept on the snapshot for inspection. The offending
/// link is dropped, so resolution never sees it.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityIssue {
    #[error("link for unknown landmark {landmark:?} (route {base_route:?})")]
    UnknownLandmark { landmark: String, base_route: String },

    #[error("{landmark:?} links base route {base_route:?} which matches no route")]
    UnknownBaseRoute { landmark: String, base_route: String },

    #[error("{landmark:?} on {base_route:?} has no nearest stop")]
    MissingNearestStop { landmark: String, base_route: String },

    #[error("{landmark:?} nearest stop {stop:?} is not on any variant of {base_route:?}")]
    StopNotOnRoute {
        landmark: String,
        base_route: String,
        stop: String,
    },
}

impl IntegrityIssue {
    /// The `served_by` entry this issue refers to, if it was attached.
    fn served_by_key(&self) -> Option<(&str, &str)> {
        match self {
            Self::UnknownLandmark { .. } => None,
            Self::UnknownBaseRoute {
                landmark,
                base_route,
            }
            | Self::MissingNearestStop {
                landmark,
                base_route,
            }
            | Self::StopNotOnRoute {
                landmark,
                base_route,
                ..
            } => Some((landmark, base_route)),
        }
    }
}

/// An immutable, query-ready view of the dataset.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub index: LandmarkIndex,
    pub routes: Vec<Route>,
    pub integrity_issues: Vec<IntegrityIssue>,
    /// Assigned by [`SnapshotStore`](super::SnapshotStore) on publish.
    pub generation: u64,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    /// Validate the tables, attach proximity links and audit the result.
    ///
    /// `landmarks` may already carry `served_by` entries (nested dataset
    /// form); links from `links` are added on top and replace an existing
    /// entry for the same base route.
    pub fn load(
        landmarks: Vec<Landmark>,
        routes: Vec<Route>,
        links: Vec<ProximityLink>,
    ) -> Result<Self, LoadError> {
        check_routes(&routes)?;
        if let Some(index) = landmarks.iter().position(|l| l.name.trim().is_empty()) {
            return Err(LoadError::EmptyLandmarkName { index });
        }

        let mut index = LandmarkIndex::build(landmarks);
        let mut integrity_issues = Vec::new();

        for link in links {
            let Some(landmark) = index.lookup_mut(&link.landmark_name) else {
                integrity_issues.push(IntegrityIssue::UnknownLandmark {
                    landmark: link.landmark_name,
                    base_route: link.base_route_name,
                });
                continue;
            };
            let entry = ProximityEntry {
                proximity: link.proximity,
                nearest_stop: link.nearest_stop,
            };
            landmark.served_by.insert(link.base_route_name, entry);
        }

        let audited = audit(&index, &routes);
        for issue in &audited {
            let Some((landmark, base_route)) = issue.served_by_key() else {
                continue;
            };
            if let Some(landmark) = index.lookup_mut(landmark) {
                landmark.served_by.shift_remove(base_route);
            }
        }
        integrity_issues.extend(audited);
        for issue in &integrity_issues {
            warn!(%issue, "data integrity, link skipped");
        }

        info!(
            landmarks = index.len(),
            routes = routes.len(),
            issues = integrity_issues.len(),
            "snapshot loaded"
        );

        Ok(Self {
            index,
            routes,
            integrity_issues,
            generation: 0,
            loaded_at: Utc::now(),
        })
    }

    /// Distinct base route names in table order.
    pub fn base_routes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.routes
            .iter()
            .map(|r| r.base_name.as_str())
            .filter(|b| seen.insert(*b))
            .collect()
    }
}

fn check_routes(routes: &[Route]) -> Result<(), LoadError> {
    if routes.is_empty() {
        return Err(LoadError::NoRoutes);
    }

    let mut names = HashSet::new();
    for (index, route) in routes.iter().enumerate() {
        if route.name.trim().is_empty() {
            return Err(LoadError::EmptyRouteName { index });
        }
        if route.stops.is_empty() {
            return Err(LoadError::NoStops {
                name: route.name.clone(),
            });
        }
        if !names.insert(normalize(&route.name)) {
            return Err(LoadError::DuplicateRoute {
                name: route.name.clone(),
            });
        }
    }
    Ok(())
}

/// Check every proximity entry against the route table.
fn audit(index: &LandmarkIndex, routes: &[Route]) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    for landmark in index.iter() {
        for (base_route, entry) in &landmark.served_by {
            let variants: Vec<&Route> = routes
                .iter()
                .filter(|r| r.is_variant_of(base_route))
                .collect();
            if variants.is_empty() {
                issues.push(IntegrityIssue::UnknownBaseRoute {
                    landmark: landmark.name.clone(),
                    base_route: base_route.clone(),
                });
                continue;
            }

            let Some(stop) = entry.nearest_stop() else {
                issues.push(IntegrityIssue::MissingNearestStop {
                    landmark: landmark.name.clone(),
                    base_route: base_route.clone(),
                });
                continue;
            };

            if variants.iter().all(|r| r.stop_indices(stop).is_empty()) {
                issues.push(IntegrityIssue::StopNotOnRoute {
                    landmark: landmark.name.clone(),
                    base_route: base_route.clone(),
                    stop: stop.to_string(),
                });
            }
        }
    }

    issues
}
