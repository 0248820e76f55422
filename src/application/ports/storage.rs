// src/application/ports/storage.rs
use crate::{
    application::ApplicationResult,
    domain::{
        image::{ImageUpload, StorageKey},
        user::AccessToken,
    },
};
use async_trait::async_trait;

/// Object store holding meal photos. Implementations are bound to one bucket.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `upload` under `key` and return the object path to resolve later.
    async fn upload(
        &self,
        key: &StorageKey,
        upload: &ImageUpload,
        token: Option<&AccessToken>,
    ) -> ApplicationResult<String>;

    async fn public_url(&self, path: &str) -> ApplicationResult<Option<String>>;

    async fn remove(&self, key: &StorageKey, token: Option<&AccessToken>) -> ApplicationResult<()>;
}
