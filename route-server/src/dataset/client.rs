//! Admin service export client.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::snapshot::ProximityLink;

use super::error::DatasetError;
use super::types::{DatasetDto, LandmarkDto, RouteDto};

/// Configuration for the dataset client.
#[derive(Debug, Clone)]
pub struct DatasetClientConfig {
    /// Base URL of the admin service export API
    pub base_url: String,
    /// Optional key sent in the x-apikey header
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DatasetClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// Fetches the three dataset tables from the admin service.
#[derive(Debug, Clone)]
pub struct DatasetClient {
    http: reqwest::Client,
    base_url: String,
}

impl DatasetClient {
    pub fn new(config: DatasetClientConfig) -> Result<Self, DatasetError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|_| DatasetError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
            headers.insert(HeaderName::from_static("x-apikey"), value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch landmarks, routes and proximity links concurrently.
    pub async fn fetch_all(&self) -> Result<DatasetDto, DatasetError> {
        let (landmarks, routes, proximity_links) = futures::try_join!(
            self.get_json::<Vec<LandmarkDto>>("landmarks"),
            self.get_json::<Vec<RouteDto>>("routes"),
            self.get_json::<Vec<ProximityLink>>("proximity-links"),
        )?;

        debug!(
            landmarks = landmarks.len(),
            routes = routes.len(),
            links = proximity_links.len(),
            "fetched dataset"
        );

        Ok(DatasetDto {
            landmarks,
            routes,
            proximity_links,
            ..DatasetDto::default()
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DatasetError> {
        let url = format!("{}/{path}", self.base_url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DatasetError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DatasetError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| DatasetError::Json {
            message: format!("{path}: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = DatasetClientConfig::new("http://admin.local/api/");
        assert_eq!(config.base_url, "http://admin.local/api");
        assert_eq!(config.api_key, None);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_with_api_key() {
        let config = DatasetClientConfig::new("http://admin.local").with_api_key("secret");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert!(DatasetClient::new(config).is_ok());
    }

    #[test]
    fn rejects_bad_api_key() {
        let config = DatasetClientConfig::new("http://admin.local").with_api_key("bad\nkey");
        assert!(matches!(
            DatasetClient::new(config),
            Err(DatasetError::Api { status: 0, .. })
        ));
    }
}
