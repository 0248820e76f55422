// tests/support/mocks/storage.rs
use async_trait::async_trait;
use std::sync::Mutex;

use recipe_box::application::{
    ApplicationResult, error::ApplicationError, ports::storage::ObjectStorage,
};
use recipe_box::domain::{
    image::{ImageUpload, StorageKey},
    user::AccessToken,
};

pub const PUBLIC_BASE: &str = "https://cdn.test/storage/v1/object/public/meal-pics";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
    pub token: Option<String>,
}

/// In-memory bucket. Removing an unknown key fails the way the hosted API
/// does, so double deletes can be observed.
#[derive(Default)]
pub struct RecordingStorage {
    objects: Mutex<Vec<StoredObject>>,
    removals: Mutex<Vec<String>>,
    fail_uploads: bool,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }

    pub fn removal_attempts(&self) -> Vec<String> {
        self.removals.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.objects().len() + self.removal_attempts().len()
    }
}

#[async_trait]
impl ObjectStorage for RecordingStorage {
    async fn upload(
        &self,
        key: &StorageKey,
        upload: &ImageUpload,
        token: Option<&AccessToken>,
    ) -> ApplicationResult<String> {
        if self.fail_uploads {
            return Err(ApplicationError::infrastructure("bucket not found"));
        }
        self.objects.lock().unwrap().push(StoredObject {
            key: key.as_str().to_string(),
            file_name: upload.file_name.clone(),
            content_type: upload.content_type_or_default().to_string(),
            size: upload.bytes.len(),
            token: token.map(|token| token.as_str().to_string()),
        });
        Ok(key.as_str().to_string())
    }

    async fn public_url(&self, path: &str) -> ApplicationResult<Option<String>> {
        if path.is_empty() {
            return Ok(None);
        }
        Ok(Some(format!("{PUBLIC_BASE}/{path}")))
    }

    async fn remove(&self, key: &StorageKey, _token: Option<&AccessToken>) -> ApplicationResult<()> {
        self.removals.lock().unwrap().push(key.as_str().to_string());
        let mut objects = self.objects.lock().unwrap();
        let before = objects.len();
        objects.retain(|object| object.key != key.as_str());
        if objects.len() == before {
            return Err(ApplicationError::not_found("Object not found"));
        }
        Ok(())
    }
}
