//! Landmark records and route proximity data.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown proximity tier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid proximity tier: {0:?}")]
pub struct InvalidProximity(pub String);

/// Discrete closeness rating between a landmark and a route's nearest stop.
///
/// The dataset may use either the English identifiers or the Arabic labels
/// the original data was entered with.
///
/// # Examples
///
/// ```
/// use route_server::domain::Proximity;
///
/// assert_eq!("very_near".parse::<Proximity>(), Ok(Proximity::VeryNear));
/// assert_eq!("متوسطة".parse::<Proximity>(), Ok(Proximity::Medium));
/// assert!("nearby".parse::<Proximity>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Proximity {
    #[serde(rename = "very_near", alias = "قريبة جدا", alias = "قريبة جداً")]
    VeryNear,
    #[serde(rename = "medium", alias = "متوسطة")]
    Medium,
    #[serde(rename = "far", alias = "بعيدة")]
    Far,
}

impl Proximity {
    /// All tiers, closest first.
    pub const ALL: [Proximity; 3] = [Proximity::VeryNear, Proximity::Medium, Proximity::Far];

    /// Stable identifier used in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Proximity::VeryNear => "very_near",
            Proximity::Medium => "medium",
            Proximity::Far => "far",
        }
    }

    /// Arabic label shown to riders.
    pub fn label(&self) -> &'static str {
        match self {
            Proximity::VeryNear => "قريبة جدا",
            Proximity::Medium => "متوسطة",
            Proximity::Far => "بعيدة",
        }
    }
}

impl FromStr for Proximity {
    type Err = InvalidProximity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Proximity::ALL
            .into_iter()
            .find(|p| {
                trimmed.eq_ignore_ascii_case(p.as_str())
                    || trimmed == p.label()
                    || trimmed.trim_end_matches('ً') == p.label()
            })
            .ok_or_else(|| InvalidProximity(s.to_string()))
    }
}

impl fmt::Display for Proximity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a landmark relates to one base route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProximityEntry {
    pub proximity: Proximity,

    /// Stop the rider should use for this landmark. Should appear in the
    /// stop list of at least one variant of the base route.
    #[serde(default)]
    pub nearest_stop: Option<String>,
}

impl ProximityEntry {
    pub fn new(proximity: Proximity, nearest_stop: impl Into<String>) -> Self {
        Self {
            proximity,
            nearest_stop: Some(nearest_stop.into()),
        }
    }

    /// Entry with no nearest stop recorded.
    pub fn without_stop(proximity: Proximity) -> Self {
        Self {
            proximity,
            nearest_stop: None,
        }
    }

    /// The nearest stop, if present and not blank.
    pub fn nearest_stop(&self) -> Option<&str> {
        self.nearest_stop
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// A named point of interest.
///
/// `served_by` is keyed by base route name and keeps dataset order, which
/// fixes the order of direct suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Landmark {
    pub name: String,
    pub neighborhood: String,
    pub category: String,
    pub served_by: IndexMap<String, ProximityEntry>,
}

impl Landmark {
    /// Create a landmark not yet linked to any route.
    pub fn new(
        name: impl Into<String>,
        neighborhood: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            neighborhood: neighborhood.into(),
            category: category.into(),
            served_by: IndexMap::new(),
        }
    }

    /// Add (or replace) the proximity entry for a base route.
    pub fn with_route(mut self, base_route: impl Into<String>, entry: ProximityEntry) -> Self {
        self.served_by.insert(base_route.into(), entry);
        self
    }
}
