use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::domain::SubjectId;
use tracing::{debug, info, warn};

use crate::{
    error::CardError,
    transport::HttpServiceClient,
    types::{ImageAsset, Subject, SubjectImageSet},
};

#[async_trait]
pub trait DirectoryService: Send + Sync {
    async fn fetch_subjects(&self) -> Result<Vec<Subject>>;
}

#[async_trait]
pub trait ImageCatalogService: Send + Sync {
    /// The whole catalog, unfiltered.
    async fn fetch_catalog(&self) -> Result<Vec<ImageAsset>>;
}

pub struct MissingDirectoryService;

#[async_trait]
impl DirectoryService for MissingDirectoryService {
    async fn fetch_subjects(&self) -> Result<Vec<Subject>> {
        Err(anyhow!("directory service is not configured"))
    }
}

pub struct MissingImageCatalogService;

#[async_trait]
impl ImageCatalogService for MissingImageCatalogService {
    async fn fetch_catalog(&self) -> Result<Vec<ImageAsset>> {
        Err(anyhow!("image catalog service is not configured"))
    }
}

/// Joins directory and catalog results. Every call goes to the services.
#[derive(Clone)]
pub struct DataAssembler {
    directory: Arc<dyn DirectoryService>,
    catalog: Arc<dyn ImageCatalogService>,
}

impl Default for DataAssembler {
    fn default() -> Self {
        Self::new(
            Arc::new(MissingDirectoryService),
            Arc::new(MissingImageCatalogService),
        )
    }
}

impl DataAssembler {
    pub fn new(
        directory: Arc<dyn DirectoryService>,
        catalog: Arc<dyn ImageCatalogService>,
    ) -> Self {
        Self { directory, catalog }
    }

    pub fn from_http(client: Arc<HttpServiceClient>) -> Self {
        Self::new(client.clone(), client)
    }

    pub async fn load_subjects(&self) -> Result<Vec<Subject>, CardError> {
        let subjects = self.directory.fetch_subjects().await.map_err(|source| {
            warn!(error = %source, "directory load failed");
            CardError::DirectoryUnavailable { source }
        })?;
        info!(count = subjects.len(), "loaded subjects from directory");
        Ok(subjects)
    }

    pub async fn load_images_for(
        &self,
        subject_id: &SubjectId,
    ) -> Result<SubjectImageSet, CardError> {
        let catalog = self.catalog.fetch_catalog().await.map_err(|source| {
            warn!(%subject_id, error = %source, "image catalog load failed");
            CardError::CatalogUnavailable {
                subject_id: subject_id.clone(),
                source,
            }
        })?;

        let catalog_size = catalog.len();
        let images = SubjectImageSet::from_catalog(subject_id.clone(), catalog);
        debug!(
            %subject_id,
            catalog_size,
            matched = images.len(),
            "filtered image catalog for subject"
        );
        Ok(images)
    }
}
