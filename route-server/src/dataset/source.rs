//! Where snapshots are loaded from.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::snapshot::Snapshot;

use super::client::DatasetClient;
use super::convert::convert_dataset;
use super::error::DatasetError;
use super::types::DatasetDto;

/// A dataset location plus the currency label for numeric fares.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    kind: SourceKind,
    currency: String,
}

#[derive(Debug, Clone)]
enum SourceKind {
    File(PathBuf),
    Remote(DatasetClient),
}

impl DatasetSource {
    /// Read the dataset from a JSON file.
    pub fn file(path: impl AsRef<Path>, currency: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::File(path.as_ref().to_path_buf()),
            currency: currency.into(),
        }
    }

    /// Fetch the dataset from the admin service.
    pub fn remote(client: DatasetClient, currency: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Remote(client),
            currency: currency.into(),
        }
    }

    /// Human-readable description for logs.
    pub fn describe(&self) -> String {
        match &self.kind {
            SourceKind::File(path) => format!("file {}", path.display()),
            SourceKind::Remote(_) => "admin service".to_string(),
        }
    }

    /// Fetch the dataset document.
    pub async fn fetch(&self) -> Result<DatasetDto, DatasetError> {
        match &self.kind {
            SourceKind::File(path) => read_file(path).await,
            SourceKind::Remote(client) => client.fetch_all().await,
        }
    }

    /// Fetch and build a snapshot.
    pub async fn load(&self) -> Result<Snapshot, DatasetError> {
        let dto = self.fetch().await?;
        let snapshot = convert_dataset(dto, &self.currency).into_snapshot()?;
        info!(source = %self.describe(), "dataset loaded");
        Ok(snapshot)
    }
}

async fn read_file(path: &Path) -> Result<DatasetDto, DatasetError> {
    let body = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;

    serde_json::from_str(&body).map_err(|e| DatasetError::Json {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        std::fs::write(
            &path,
            r#"{
                "landmarks": [{"name": "A", "neighborhood": "n", "category": "c"}],
                "routes": [{"name": "R1", "fare": 7.5, "stops": ["A", "B"]}],
                "proximity_links": [{"landmark_name": "A", "base_route_name": "R1", "proximity": "قريبة جدا", "nearest_stop": "A"}]
            }"#,
        )
        .unwrap();

        let snapshot = DatasetSource::file(&path, "جنيه").load().await.unwrap();
        assert_eq!(snapshot.routes[0].fare.label(), "7.5 جنيه");
        assert_eq!(snapshot.index.lookup("a").unwrap().served_by.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DatasetSource::file(dir.path().join("nope.json"), "جنيه");
        assert!(matches!(source.load().await, Err(DatasetError::Io { .. })));
    }

    #[tokio::test]
    async fn malformed_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        std::fs::write(&path, "{not json").unwrap();

        let source = DatasetSource::file(&path, "جنيه");
        assert!(matches!(source.fetch().await, Err(DatasetError::Json { .. })));
    }
}
