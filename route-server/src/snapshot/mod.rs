//! Loaded dataset snapshots.
//!
//! A [`Snapshot`] is built once from the dataset tables and never mutated.
//! Reloading builds a fresh snapshot and publishes it through the
//! [`SnapshotStore`].

mod load;
mod store;

pub use load::{IntegrityIssue, LoadError, ProximityLink, Snapshot};
pub use store::SnapshotStore;
