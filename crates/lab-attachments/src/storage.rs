//! Storage Abstraction
//!
//! Provides a unified interface for file storage backends. Keys are
//! relative paths under a fixed root (`images/...`, `attachments/...`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage trait - unified interface for storage backends
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store data under a key, creating parent directories as needed
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()>;

    /// Retrieve data by key
    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    /// Delete data by key. Fails with [`StorageError::NotFound`] when the
    /// key is absent: a missing backing file means the row referencing it
    /// is already inconsistent, and the caller must not delete the row.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if key exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get storage name for logging
    fn name(&self) -> &str;
}

/// Local filesystem storage
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Resolve a key to a full path
    fn resolve_path(&self, key: &str) -> StorageResult<PathBuf> {
        // Prevent directory traversal
        if key.contains("..") || key.starts_with('/') || key.starts_with('\\') {
            return Err(StorageError::InvalidPath(key.to_string()));
        }

        Ok(self.root.join(key))
    }

    async fn ensure_parent(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    #[instrument(skip(self, data), fields(storage = "local"))]
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()> {
        let path = self.resolve_path(key)?;
        self.ensure_parent(&path).await?;

        let mut file = fs::File::create(&path).await?;
        file.write_all(&data).await?;
        file.sync_all().await?;

        debug!(path = ?path, size = data.len(), "File stored");
        Ok(())
    }

    #[instrument(skip(self), fields(storage = "local"))]
    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        let path = self.resolve_path(key)?;

        if !path.exists() {
            return Err(StorageError::NotFound(key.to_string()));
        }

        let mut file = fs::File::open(&path).await?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer).await?;

        Ok(Bytes::from(buffer))
    }

    #[instrument(skip(self), fields(storage = "local"))]
    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.resolve_path(key)?;

        if !path.exists() {
            return Err(StorageError::NotFound(key.to_string()));
        }

        fs::remove_file(&path).await?;
        debug!(path = ?path, "File deleted");
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.resolve_path(key)?;
        Ok(path.exists())
    }

    fn name(&self) -> &str {
        "local"
    }
}

/// In-memory storage for testing
#[derive(Default)]
pub struct MemoryStorage {
    files: tokio::sync::RwLock<HashMap<String, Bytes>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()> {
        self.files.write().await.insert(key.to_string(), data);
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        self.files
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.files
            .write()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.files.read().await.contains_key(key))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Generate an opaque file token: 128 random bits, hex-encoded. Exposed to
/// clients in place of the storage filename, so internal layout can change
/// without breaking external links.
pub fn generate_file_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Extract and sanitize the extension of a client-supplied filename:
/// substring after the last `.`, restricted to short alphanumeric runs.
/// Anything else (missing dot, traversal attempts, oversized extensions)
/// yields `None`.
pub fn sanitize_extension(filename: &str) -> Option<String> {
    let ext = filename.rsplit('.').next()?;
    if ext.is_empty()
        || ext.len() == filename.len() // no dot at all
        || ext.len() > 10
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Derive the disk filename for a token and an original upload name
pub fn disk_filename_for(token: &str, original_filename: &str) -> String {
    match sanitize_extension(original_filename) {
        Some(ext) => format!("{token}.{ext}"),
        None => token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_put_get() {
        let storage = MemoryStorage::new();
        let data = Bytes::from("Hello, World!");

        storage.put("images/test.txt", data.clone()).await.unwrap();
        let retrieved = storage.get("images/test.txt").await.unwrap();
        assert_eq!(retrieved, data);
    }

    #[tokio::test]
    async fn test_memory_storage_delete_missing_fails() {
        let storage = MemoryStorage::new();
        let result = storage.delete("images/nope.png").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_local_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        let data = Bytes::from("file bytes");

        storage.put("images/a1b2.png", data.clone()).await.unwrap();
        assert!(storage.exists("images/a1b2.png").await.unwrap());
        assert_eq!(storage.get("images/a1b2.png").await.unwrap(), data);

        storage.delete("images/a1b2.png").await.unwrap();
        assert!(!storage.exists("images/a1b2.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_local_storage_delete_missing_fails() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let result = storage.delete("images/ghost.png").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_local_storage_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let result = storage.get("../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
    }

    #[test]
    fn test_generate_file_token() {
        let token = generate_file_token();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, generate_file_token());
    }

    #[test]
    fn test_sanitize_extension() {
        assert_eq!(sanitize_extension("photo.PNG"), Some("png".to_string()));
        assert_eq!(sanitize_extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(sanitize_extension("noextension"), None);
        assert_eq!(sanitize_extension("trailingdot."), None);
        assert_eq!(sanitize_extension("weird.p/ng"), None);
        assert_eq!(sanitize_extension("long.abcdefghijk"), None);
    }

    #[test]
    fn test_disk_filename_for() {
        assert_eq!(disk_filename_for("ab12", "report.pdf"), "ab12.pdf");
        assert_eq!(disk_filename_for("ab12", "noext"), "ab12");
    }
}
