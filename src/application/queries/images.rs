// src/application/queries/images.rs
use crate::application::{ApplicationResult, ports::storage::ObjectStorage};
use std::sync::Arc;

pub struct ImageQueryService {
    storage: Arc<dyn ObjectStorage>,
}

impl ImageQueryService {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    pub async fn public_url(&self, path: &str) -> ApplicationResult<Option<String>> {
        let url = self.storage.public_url(path).await?;
        match &url {
            Some(url) => tracing::debug!(path, url = %url, "image url resolved"),
            None => tracing::warn!(path, "no public url for image"),
        }
        Ok(url)
    }
}
