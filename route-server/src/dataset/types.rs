//! Dataset JSON DTOs.
//!
//! These mirror the JSON exported by the admin service and the dataset file
//! format. Both the current flat tables and the older nested
//! neighborhood → category → landmarks layout are accepted; the route keys
//! `routeName` / `keyPoints` from older exports are accepted as aliases.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::ProximityEntry;
use crate::snapshot::ProximityLink;

/// A complete dataset document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatasetDto {
    #[serde(default)]
    pub landmarks: Vec<LandmarkDto>,

    /// Nested layout: neighborhood → category → landmarks.
    #[serde(default)]
    pub neighborhoods: IndexMap<String, IndexMap<String, Vec<NestedLandmarkDto>>>,

    #[serde(default)]
    pub routes: Vec<RouteDto>,

    #[serde(default)]
    pub proximity_links: Vec<ProximityLink>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LandmarkDto {
    pub name: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub category: String,
}

/// A landmark inside the nested layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NestedLandmarkDto {
    /// Older datasets list bare names with no route links.
    Legacy(String),
    Record {
        name: String,
        #[serde(default)]
        served_by: IndexMap<String, ProximityEntry>,
    },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteDto {
    #[serde(alias = "routeName")]
    pub name: String,

    #[serde(default)]
    pub fare: Option<FareDto>,

    #[serde(alias = "keyPoints")]
    pub stops: Vec<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default, alias = "baseName")]
    pub base_name: Option<String>,
}

/// Fares appear either as a number or as a ready display label.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FareDto {
    Amount(f64),
    Label(String),
}
