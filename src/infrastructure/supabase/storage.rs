use super::{SupabaseClient, send};
use crate::{
    application::{ApplicationResult, ports::storage::ObjectStorage},
    domain::{
        image::{ImageUpload, StorageKey},
        user::AccessToken,
    },
};
use async_trait::async_trait;
use reqwest::{Method, header::CONTENT_TYPE};
use serde::Serialize;

const CACHE_CONTROL_SECS: u32 = 3600;

/// Storage API adapter bound to a single bucket.
#[derive(Clone)]
pub struct SupabaseObjectStorage {
    client: SupabaseClient,
    bucket: String,
}

impl SupabaseObjectStorage {
    pub fn new(client: SupabaseClient, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[derive(Serialize)]
struct RemoveRequest<'a> {
    prefixes: [&'a str; 1],
}

#[async_trait]
impl ObjectStorage for SupabaseObjectStorage {
    async fn upload(
        &self,
        key: &StorageKey,
        upload: &ImageUpload,
        token: Option<&AccessToken>,
    ) -> ApplicationResult<String> {
        let url = self
            .client
            .endpoint(["storage", "v1", "object", self.bucket.as_str(), key.as_str()]);
        let request = self
            .client
            .request(Method::POST, url, token)
            .header(CONTENT_TYPE, upload.content_type_or_default())
            .header("cache-control", format!("max-age={CACHE_CONTROL_SECS}"))
            .header("x-upsert", "false")
            .body(upload.bytes.clone());

        send(request, "upload object").await?;
        Ok(key.as_str().to_string())
    }

    async fn public_url(&self, path: &str) -> ApplicationResult<Option<String>> {
        let segments: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();
        if segments.is_empty() {
            return Ok(None);
        }

        let prefix = ["storage", "v1", "object", "public", self.bucket.as_str()];
        let url = self
            .client
            .endpoint(prefix.into_iter().chain(segments));
        Ok(Some(url.to_string()))
    }

    async fn remove(&self, key: &StorageKey, token: Option<&AccessToken>) -> ApplicationResult<()> {
        let url = self
            .client
            .endpoint(["storage", "v1", "object", self.bucket.as_str()]);
        let request = self
            .client
            .request(Method::DELETE, url, token)
            .json(&RemoveRequest {
                prefixes: [key.as_str()],
            });

        send(request, "remove object").await?;
        Ok(())
    }
}
