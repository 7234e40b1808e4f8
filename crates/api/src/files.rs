//! HTTP client for the external object store.
//!
//! Attachments live in a single bucket of an S3-style object store with
//! public-by-key reads. Uploads go through the authenticated write
//! endpoint; download URLs are unsigned and derived purely from the key,
//! so they can be stored and handed to clients as-is.

use echotasks_core::types::DbId;
use uuid::Uuid;

/// Configuration for the object store client.
#[derive(Debug, Clone)]
pub struct FileStoreConfig {
    /// Base URL of the object store (no trailing slash).
    pub base_url: String,
    /// Bucket holding all project attachments.
    pub bucket: String,
    /// Bearer token for write access.
    pub service_key: String,
}

impl FileStoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `FILE_STORE_URL` is not set, signalling that
    /// uploads are not configured.
    ///
    /// | Variable                 | Required | Default            |
    /// |--------------------------|----------|--------------------|
    /// | `FILE_STORE_URL`         | yes      | —                  |
    /// | `FILE_STORE_BUCKET`      | no       | `project-files`    |
    /// | `FILE_STORE_SERVICE_KEY` | yes      | —                  |
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("FILE_STORE_URL").ok()?;
        let service_key = std::env::var("FILE_STORE_SERVICE_KEY")
            .expect("FILE_STORE_SERVICE_KEY must be set when FILE_STORE_URL is");
        Some(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: std::env::var("FILE_STORE_BUCKET")
                .unwrap_or_else(|_| "project-files".to_string()),
            service_key,
        })
    }
}

/// Error type for object store operations.
#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    /// Transport-level failure talking to the store.
    #[error("File store request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("File store rejected upload: HTTP {0}")]
    Rejected(u16),
}

/// Client for uploading attachments and deriving their public URLs.
pub struct FileStore {
    config: FileStoreConfig,
    client: reqwest::Client,
}

impl FileStore {
    /// Create a client with the given configuration.
    pub fn new(config: FileStoreConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Build the storage key for an uploaded file.
    ///
    /// Keys are namespaced by project and prefixed with a UUID so two
    /// uploads of the same filename never collide.
    pub fn object_key(project_id: DbId, filename: &str) -> String {
        format!("{project_id}/{}-{}", Uuid::new_v4(), sanitize(filename))
    }

    /// Upload raw bytes under `key`, returning the key on success.
    pub async fn upload(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, FileStoreError> {
        let url = format!(
            "{}/storage/v1/object/{}/{key}",
            self.config.base_url, self.config.bucket
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.service_key)
            .header("content-type", content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FileStoreError::Rejected(response.status().as_u16()));
        }
        tracing::info!(key, "Uploaded file to object store");
        Ok(key.to_string())
    }

    /// Public download URL for a stored key. Unsigned; anyone holding
    /// the URL can fetch the object.
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{key}",
            self.config.base_url, self.config.bucket
        )
    }
}

/// Strip path separators and control characters from a client-supplied
/// filename before it becomes part of a storage key.
fn sanitize(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> FileStore {
        FileStore::new(FileStoreConfig {
            base_url: "https://files.example.com".to_string(),
            bucket: "project-files".to_string(),
            service_key: "key".to_string(),
        })
    }

    #[test]
    fn public_url_uses_public_object_path() {
        let store = test_store();
        assert_eq!(
            store.public_url("7/abc-report.pdf"),
            "https://files.example.com/storage/v1/object/public/project-files/7/abc-report.pdf"
        );
    }

    #[test]
    fn object_key_is_project_scoped_and_unique() {
        let a = FileStore::object_key(7, "report.pdf");
        let b = FileStore::object_key(7, "report.pdf");
        assert!(a.starts_with("7/"));
        assert!(a.ends_with("-report.pdf"));
        assert_ne!(a, b, "two uploads of the same name must not collide");
    }

    #[test]
    fn sanitize_replaces_separators() {
        assert_eq!(sanitize("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize(""), "file");
    }
}
