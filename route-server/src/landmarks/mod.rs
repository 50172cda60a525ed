//! Landmark lookup and fuzzy name matching.

mod fuzzy;
mod index;

pub use fuzzy::{FuzzyMatcher, Match, similarity};
pub use index::{LandmarkIndex, display_line};
