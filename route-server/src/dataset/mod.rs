//! Dataset loading.
//!
//! The dataset is either a JSON file on disk or the JSON export of the admin
//! service. Both are converted into the tables [`crate::snapshot::Snapshot`]
//! is built from.

mod client;
mod convert;
mod error;
mod source;
mod types;

pub use client::{DatasetClient, DatasetClientConfig};
pub use convert::{DatasetTables, convert_dataset, convert_route};
pub use error::DatasetError;
pub use source::DatasetSource;
pub use types::{DatasetDto, FareDto, LandmarkDto, NestedLandmarkDto, RouteDto};
