//! Route variants and fares.

use std::fmt;

use serde::Serialize;

use super::text::{contains_normalized, normalize};

/// A fare as displayed to riders, e.g. `"5 جنيه"`.
///
/// Fares are kept as display labels. Two fares are never added numerically;
/// a two-leg journey shows both labels side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Fare(String);

impl Fare {
    /// Create a fare from a display label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into().trim().to_string())
    }

    /// Create a fare from a numeric amount and a currency label.
    ///
    /// ```
    /// use route_server::domain::Fare;
    ///
    /// assert_eq!(Fare::from_amount(5.0, "جنيه").label(), "5 جنيه");
    /// assert_eq!(Fare::from_amount(7.5, "جنيه").label(), "7.5 جنيه");
    /// ```
    pub fn from_amount(amount: f64, currency: &str) -> Self {
        let amount = if amount.fract() == 0.0 && amount.abs() < 1e15 {
            format!("{}", amount as i64)
        } else {
            format!("{amount}")
        };
        Self::new(format!("{amount} {}", currency.trim()))
    }

    /// The display label.
    pub fn label(&self) -> &str {
        &self.0
    }

    /// Display both legs' fares together: `"<self> + <other>"`.
    pub fn combine(&self, other: &Fare) -> String {
        format!("{} + {}", self.0, other.0)
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A concrete route variant with its own stop order.
///
/// Several variants (e.g. inner and outer loop) share a `base_name`; the
/// order of `stops` is the physical direction of travel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub name: String,
    pub base_name: String,
    pub fare: Fare,
    pub stops: Vec<String>,
    pub notes: Option<String>,
}

impl Route {
    /// Create a route, deriving its base name from `name`.
    pub fn new(name: impl Into<String>, fare: Fare, stops: Vec<String>) -> Self {
        let name = name.into();
        let base_name = Self::derive_base_name(&name);
        Self {
            name,
            base_name,
            fare,
            stops,
            notes: None,
        }
    }

    /// Override the derived base name.
    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }

    /// Attach rider notes; blank notes are dropped.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = (!notes.trim().is_empty()).then_some(notes);
        self
    }

    /// Derive the base name shared by variants: everything before the first
    /// `(` or ` - `.
    ///
    /// ```
    /// use route_server::domain::Route;
    ///
    /// assert_eq!(Route::derive_base_name("خط 7 (داخلي)"), "خط 7");
    /// assert_eq!(Route::derive_base_name("Line 3 - outer loop"), "Line 3");
    /// assert_eq!(Route::derive_base_name("Line 4"), "Line 4");
    /// ```
    pub fn derive_base_name(name: &str) -> String {
        let cut = [name.find('('), name.find(" - ")]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(name.len());
        let base = name[..cut].trim();
        if base.is_empty() {
            name.trim().to_string()
        } else {
            base.to_string()
        }
    }

    /// Whether this record is a variant of `base_name`: its own base name
    /// matches (normalized), or its full name contains `base_name`.
    pub fn is_variant_of(&self, base_name: &str) -> bool {
        if base_name.trim().is_empty() {
            return false;
        }
        normalize(&self.base_name) == normalize(base_name) || self.name.contains(base_name)
    }

    /// Indices of every stop containing `stop_name` (normalized substring).
    pub fn stop_indices(&self, stop_name: &str) -> Vec<usize> {
        let needle = normalize(stop_name);
        if needle.is_empty() {
            return Vec::new();
        }
        self.stops
            .iter()
            .enumerate()
            .filter(|(_, stop)| normalize(stop).contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether any stop contains `name` (normalized substring).
    pub fn serves(&self, name: &str) -> bool {
        self.stops.iter().any(|stop| contains_normalized(stop, name))
    }
}
