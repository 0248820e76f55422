// src/application/commands/images.rs
use crate::{
    application::{
        dto::UploadedImageDto,
        error::{ApplicationError, ApplicationResult},
        ports::{
            storage::ObjectStorage,
            util::{SlugGenerator, TokenGenerator},
        },
        queries::images::ImageQueryService,
    },
    domain::{
        image::{ImageUpload, StorageKey},
        user::AccessToken,
    },
};
use std::sync::Arc;

pub struct UploadImageCommand {
    pub recipe_name: String,
    pub file: Option<ImageUpload>,
}

pub struct ImageCommandService {
    storage: Arc<dyn ObjectStorage>,
    image_queries: Arc<ImageQueryService>,
    slugger: Arc<dyn SlugGenerator>,
    tokens: Arc<dyn TokenGenerator>,
}

impl ImageCommandService {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        image_queries: Arc<ImageQueryService>,
        slugger: Arc<dyn SlugGenerator>,
        tokens: Arc<dyn TokenGenerator>,
    ) -> Self {
        Self {
            storage,
            image_queries,
            slugger,
            tokens,
        }
    }

    /// Upload a meal photo under a fresh key derived from the recipe name and
    /// resolve its public URL.
    pub async fn upload(
        &self,
        command: UploadImageCommand,
        token: Option<&AccessToken>,
    ) -> ApplicationResult<UploadedImageDto> {
        let Some(file) = command.file.filter(|file| !file.is_empty()) else {
            tracing::error!(recipe = %command.recipe_name, "no file uploaded");
            return Err(ApplicationError::missing_input("no file uploaded"));
        };

        let key = self.storage_key_for(&command.recipe_name);
        let path = match self.storage.upload(&key, &file, token).await {
            Ok(path) => path,
            Err(err) => {
                tracing::error!(key = %key, error = %err, "image upload failed");
                return Err(err);
            }
        };
        tracing::info!(key = %key, bytes = file.bytes.len(), "image uploaded");

        let public_url = self
            .image_queries
            .public_url(&path)
            .await?
            .ok_or_else(|| ApplicationError::infrastructure(format!("no public url for {path}")))?;

        Ok(UploadedImageDto {
            key: key.to_string(),
            public_url,
        })
    }

    pub fn storage_key_for(&self, recipe_name: &str) -> StorageKey {
        let slug = self.slugger.slugify(recipe_name);
        StorageKey::compose(&slug, &self.tokens.unique_token())
    }

    /// Remove a stored photo. Storage errors are logged and swallowed.
    pub async fn delete(&self, key: &StorageKey, token: Option<&AccessToken>) {
        match self.storage.remove(key, token).await {
            Ok(()) => tracing::info!(key = %key, "image deleted"),
            Err(err) => tracing::error!(key = %key, error = %err, "image delete failed"),
        }
    }
}
