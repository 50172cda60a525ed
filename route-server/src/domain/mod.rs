//! Domain types for the route resolver.
//!
//! Landmarks and route variants are loaded once into a snapshot and never
//! mutated afterwards. Every name comparison goes through [`normalize`].

mod landmark;
mod route;
mod text;

pub use landmark::{InvalidProximity, Landmark, Proximity, ProximityEntry};
pub use route::{Fare, Route};
pub use text::{contains_normalized, normalize};
