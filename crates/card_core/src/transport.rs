use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::protocol::{ImageRecord, PersonalInfoRecord, IMAGE_PATH, PERSONAL_INFO_PATH};
use tracing::debug;
use url::Url;

use crate::{
    assembler::{DirectoryService, ImageCatalogService},
    types::{ImageAsset, Subject},
};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Talks to the directory (`/personalinfo`) and image catalog (`/image`)
/// collections under one base address.
pub struct HttpServiceClient {
    http: Client,
    base_url: Url,
}

impl HttpServiceClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .with_context(|| format!("invalid service base url '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("service base url '{base_url}' cannot carry a path"));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, collection: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("service base url '{}' cannot carry a path", self.base_url))?
            .pop_if_empty()
            .push(collection);
        Ok(url)
    }

    async fn fetch_collection<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        let url = self.endpoint(collection)?;
        debug!(%url, "fetching service collection");
        let records = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()?
            .json::<Vec<T>>()
            .await
            .with_context(|| format!("malformed response from {url}"))?;
        Ok(records)
    }
}

#[async_trait]
impl DirectoryService for HttpServiceClient {
    async fn fetch_subjects(&self) -> Result<Vec<Subject>> {
        let records: Vec<PersonalInfoRecord> = self.fetch_collection(PERSONAL_INFO_PATH).await?;
        Ok(records.into_iter().map(Subject::from).collect())
    }
}

#[async_trait]
impl ImageCatalogService for HttpServiceClient {
    async fn fetch_catalog(&self) -> Result<Vec<ImageAsset>> {
        let records: Vec<ImageRecord> = self.fetch_collection(IMAGE_PATH).await?;
        Ok(records.into_iter().map(ImageAsset::from).collect())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
