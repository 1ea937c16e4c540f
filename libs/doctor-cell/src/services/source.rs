// libs/doctor-cell/src/services/source.rs
use async_trait::async_trait;
use tracing::debug;

use shared_config::AppConfig;
use shared_source::JsonSourceClient;

use crate::models::{DirectoryError, ProviderDoctor};

/// Where the raw doctor records come from.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    async fn fetch_doctors(&self) -> Result<Vec<ProviderDoctor>, DirectoryError>;
}

/// Single anonymous GET against the configured JSON endpoint.
pub struct HttpDirectorySource {
    client: JsonSourceClient,
}

impl HttpDirectorySource {
    pub fn new(config: &AppConfig) -> Result<Self, DirectoryError> {
        let client = JsonSourceClient::new(config)
            .map_err(|e| DirectoryError::FetchFailure(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DirectorySource for HttpDirectorySource {
    async fn fetch_doctors(&self) -> Result<Vec<ProviderDoctor>, DirectoryError> {
        debug!("Fetching doctor directory from {}", self.client.url());

        self.client
            .fetch::<Vec<ProviderDoctor>>()
            .await
            .map_err(|e| DirectoryError::FetchFailure(e.to_string()))
    }
}

/// Fixed in-memory records.
pub struct StaticDirectorySource {
    records: Vec<ProviderDoctor>,
}

impl StaticDirectorySource {
    pub fn new(records: Vec<ProviderDoctor>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DirectorySource for StaticDirectorySource {
    async fn fetch_doctors(&self) -> Result<Vec<ProviderDoctor>, DirectoryError> {
        Ok(self.records.clone())
    }
}
