// src/domain/image.rs
use crate::domain::errors::{DomainError, DomainResult};
use bytes::Bytes;
use std::fmt;

/// Object key of a meal photo inside the image bucket: `{slug}-{token}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn compose(slug: &str, token: &str) -> Self {
        Self(format!("{slug}-{token}"))
    }

    /// Accept a key supplied by a client. Keys are flat names; anything that
    /// could address another folder of the bucket is rejected.
    pub fn parse(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::Validation("storage key must not be empty".into()));
        }
        if raw.contains('/') || raw.contains('\\') || raw == "." || raw == ".." {
            return Err(DomainError::Validation(format!("invalid storage key: {raw}")));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file picked in an upload form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// Browsers still submit the file part when nothing was chosen, with an
    /// empty file name and no content.
    pub fn is_empty(&self) -> bool {
        self.file_name.is_empty() && self.bytes.is_empty()
    }

    pub fn content_type_or_default(&self) -> &str {
        self.content_type
            .as_deref()
            .filter(|value| !value.is_empty())
            .unwrap_or("application/octet-stream")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_joins_slug_and_token_with_a_hyphen() {
        let key = StorageKey::compose("tomato-soup", "1bd9e5da");
        assert_eq!(key.as_str(), "tomato-soup-1bd9e5da");
    }

    #[test]
    fn parse_rejects_paths_and_blank_keys() {
        assert!(StorageKey::parse("scrambled-eggs-1234").is_ok());
        assert!(StorageKey::parse("").is_err());
        assert!(StorageKey::parse("other/secret").is_err());
        assert!(StorageKey::parse("..").is_err());
    }

    #[test]
    fn empty_file_part_counts_as_no_upload() {
        let empty = ImageUpload::new("", None, Bytes::new());
        assert!(empty.is_empty());
        assert_eq!(empty.content_type_or_default(), "application/octet-stream");

        let photo = ImageUpload::new("eggs.jpg", Some("image/jpeg".into()), Bytes::from_static(b"jpg"));
        assert!(!photo.is_empty());
        assert_eq!(photo.content_type_or_default(), "image/jpeg");
    }
}
