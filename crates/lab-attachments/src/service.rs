//! Attachment Service
//!
//! Orchestrates attachment uploads, downloads, and deletion while
//! enforcing the per-kind cardinality cap. The file write always happens
//! before the row insert, and the file delete always happens before the
//! row delete: a failed file removal aborts the operation and keeps the
//! row, so the one reference to a stored file is never silently lost.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use lab_core::traits::Id;
use lab_models::{AttachmentKind, Cardinality};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::model::Attachment;
use crate::storage::{disk_filename_for, generate_file_token, Storage, StorageError};

/// Service errors
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("{0} not exist")]
    NotFound(&'static str),
    #[error("only one {0} is allowed")]
    OnlyOneAllowed(&'static str),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("store error: {0}")]
    Store(String),
}

pub type AttachmentResult<T> = Result<T, AttachmentError>;

/// Attachment row store
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Insert a record, assigning its id
    async fn insert(&self, attachment: &mut Attachment) -> AttachmentResult<Id>;

    /// Find one record by kind and opaque token
    async fn find_by_token(
        &self,
        kind: AttachmentKind,
        token: &str,
    ) -> AttachmentResult<Option<Attachment>>;

    /// All records of a kind held by one owner, in insertion order
    async fn list_for_owner(
        &self,
        kind: AttachmentKind,
        owner_id: Id,
    ) -> AttachmentResult<Vec<Attachment>>;

    /// All records of a kind, in insertion order (for unowned kinds)
    async fn list_all(&self, kind: AttachmentKind) -> AttachmentResult<Vec<Attachment>>;

    /// Count records of a kind held by one owner
    async fn count_for_owner(&self, kind: AttachmentKind, owner_id: Id)
        -> AttachmentResult<usize>;

    /// Delete a record by id
    async fn delete(&self, id: Id) -> AttachmentResult<()>;
}

/// In-memory attachment store for testing
pub struct MemoryAttachmentStore {
    attachments: RwLock<Vec<Attachment>>,
    next_id: std::sync::atomic::AtomicI64,
}

impl Default for MemoryAttachmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAttachmentStore {
    pub fn new() -> Self {
        Self {
            attachments: RwLock::new(Vec::new()),
            next_id: std::sync::atomic::AtomicI64::new(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.attachments.read().await.len()
    }
}

#[async_trait]
impl AttachmentStore for MemoryAttachmentStore {
    async fn insert(&self, attachment: &mut Attachment) -> AttachmentResult<Id> {
        let id = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        attachment.id = Some(id);
        self.attachments.write().await.push(attachment.clone());
        Ok(id)
    }

    async fn find_by_token(
        &self,
        kind: AttachmentKind,
        token: &str,
    ) -> AttachmentResult<Option<Attachment>> {
        let attachments = self.attachments.read().await;
        Ok(attachments
            .iter()
            .find(|a| a.kind == kind && a.file_token == token)
            .cloned())
    }

    async fn list_for_owner(
        &self,
        kind: AttachmentKind,
        owner_id: Id,
    ) -> AttachmentResult<Vec<Attachment>> {
        let attachments = self.attachments.read().await;
        Ok(attachments
            .iter()
            .filter(|a| a.kind == kind && a.owner_id == Some(owner_id))
            .cloned()
            .collect())
    }

    async fn list_all(&self, kind: AttachmentKind) -> AttachmentResult<Vec<Attachment>> {
        let attachments = self.attachments.read().await;
        Ok(attachments
            .iter()
            .filter(|a| a.kind == kind)
            .cloned()
            .collect())
    }

    async fn count_for_owner(
        &self,
        kind: AttachmentKind,
        owner_id: Id,
    ) -> AttachmentResult<usize> {
        Ok(self.list_for_owner(kind, owner_id).await?.len())
    }

    async fn delete(&self, id: Id) -> AttachmentResult<()> {
        self.attachments
            .write()
            .await
            .retain(|a| a.id != Some(id));
        Ok(())
    }
}

/// Attachment service
pub struct AttachmentService<St: AttachmentStore, S: Storage> {
    store: Arc<St>,
    storage: Arc<S>,
}

impl<St: AttachmentStore, S: Storage> AttachmentService<St, S> {
    pub fn new(store: Arc<St>, storage: Arc<S>) -> Self {
        Self { store, storage }
    }

    /// Store an uploaded file and record it.
    ///
    /// The caller is responsible for verifying the owner exists; this
    /// method enforces the cardinality cap and the write-file-first
    /// ordering. A crash between the two steps can orphan a file but never
    /// a row.
    #[instrument(skip(self, data), fields(kind = %kind, filename = %filename))]
    pub async fn add(
        &self,
        kind: AttachmentKind,
        owner_id: Option<Id>,
        filename: &str,
        data: Bytes,
    ) -> AttachmentResult<Attachment> {
        if kind.cardinality() == Cardinality::AtMostOne {
            let owner_id = owner_id.ok_or(AttachmentError::Store(
                "at-most-one kinds require an owner".into(),
            ))?;
            if self.store.count_for_owner(kind, owner_id).await? > 0 {
                return Err(AttachmentError::OnlyOneAllowed(kind.type_name()));
            }
        }

        let token = generate_file_token();
        let disk_filename = disk_filename_for(&token, filename);
        let mut attachment = Attachment::new(kind, owner_id, token, filename, disk_filename);

        self.storage.put(&attachment.storage_key(), data).await?;
        let id = self.store.insert(&mut attachment).await?;

        info!(id = id, token = %attachment.file_token, "Attachment created");
        Ok(attachment)
    }

    /// Fetch an attachment record by its opaque token, scoped to the
    /// owner named in the request. A token held by a different owner
    /// resolves to NotFound, never to the other owner's record.
    pub async fn find(
        &self,
        kind: AttachmentKind,
        owner_id: Option<Id>,
        token: &str,
    ) -> AttachmentResult<Attachment> {
        self.store
            .find_by_token(kind, token)
            .await?
            .filter(|a| a.owner_id == owner_id)
            .ok_or(AttachmentError::NotFound(kind.type_name()))
    }

    /// Read back the stored bytes together with the record
    #[instrument(skip(self))]
    pub async fn download(
        &self,
        kind: AttachmentKind,
        owner_id: Option<Id>,
        token: &str,
    ) -> AttachmentResult<(Attachment, Bytes)> {
        let attachment = self.find(kind, owner_id, token).await?;
        let data = self.storage.get(&attachment.storage_key()).await?;
        Ok((attachment, data))
    }

    /// Delete one attachment: file first, then row. Storage failures
    /// propagate and leave the row in place.
    #[instrument(skip(self))]
    pub async fn remove(
        &self,
        kind: AttachmentKind,
        owner_id: Option<Id>,
        token: &str,
    ) -> AttachmentResult<Attachment> {
        let attachment = self.find(kind, owner_id, token).await?;

        self.storage.delete(&attachment.storage_key()).await?;
        if let Some(id) = attachment.id {
            self.store.delete(id).await?;
        }

        info!(token = %attachment.file_token, "Attachment deleted");
        Ok(attachment)
    }

    /// Cascade used by resource deletion: remove every attachment of a
    /// kind held by one owner, files before rows. The first storage
    /// failure aborts the cascade with rows intact.
    #[instrument(skip(self))]
    pub async fn remove_all_for_owner(
        &self,
        kind: AttachmentKind,
        owner_id: Id,
    ) -> AttachmentResult<usize> {
        let attachments = self.store.list_for_owner(kind, owner_id).await?;
        let count = attachments.len();

        for attachment in attachments {
            self.storage.delete(&attachment.storage_key()).await?;
            if let Some(id) = attachment.id {
                self.store.delete(id).await?;
            }
        }

        if count > 0 {
            info!(owner_id = owner_id, count = count, "Attachments cascaded");
        }
        Ok(count)
    }

    /// Opaque tokens held by one owner, in insertion order
    pub async fn tokens_for_owner(
        &self,
        kind: AttachmentKind,
        owner_id: Id,
    ) -> AttachmentResult<Vec<String>> {
        Ok(self
            .store
            .list_for_owner(kind, owner_id)
            .await?
            .into_iter()
            .map(|a| a.file_token)
            .collect())
    }

    /// All records of an unowned kind
    pub async fn list_all(&self, kind: AttachmentKind) -> AttachmentResult<Vec<Attachment>> {
        self.store.list_all(kind).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn service() -> AttachmentService<MemoryAttachmentStore, MemoryStorage> {
        AttachmentService::new(
            Arc::new(MemoryAttachmentStore::new()),
            Arc::new(MemoryStorage::new()),
        )
    }

    #[tokio::test]
    async fn test_upload_download_round_trip() {
        let service = service();
        let data = Bytes::from("lab member photo");

        let created = service
            .add(AttachmentKind::MemberImage, Some(7), "photo.png", data.clone())
            .await
            .unwrap();

        assert_eq!(created.filename, "photo.png");
        assert!(created.disk_filename.ends_with(".png"));
        assert_ne!(created.disk_filename, "photo.png");

        let (record, bytes) = service
            .download(AttachmentKind::MemberImage, Some(7), &created.file_token)
            .await
            .unwrap();
        assert_eq!(bytes, data);
        assert_eq!(record.filename, "photo.png");
    }

    #[tokio::test]
    async fn test_second_upload_conflicts_for_at_most_one() {
        let storage = Arc::new(MemoryStorage::new());
        let service = AttachmentService::new(Arc::new(MemoryAttachmentStore::new()), storage.clone());

        service
            .add(AttachmentKind::ProjectIcon, Some(3), "icon.png", Bytes::from("a"))
            .await
            .unwrap();

        let result = service
            .add(AttachmentKind::ProjectIcon, Some(3), "icon2.png", Bytes::from("b"))
            .await;
        assert!(matches!(result, Err(AttachmentError::OnlyOneAllowed(_))));

        // Storage must gain no new file from the rejected upload
        assert_eq!(storage.len().await, 1);
    }

    #[tokio::test]
    async fn test_many_cardinality_has_no_cap() {
        let service = service();
        for i in 0..4 {
            service
                .add(
                    AttachmentKind::ActivityImage,
                    Some(5),
                    &format!("img{i}.jpg"),
                    Bytes::from(format!("bytes {i}")),
                )
                .await
                .unwrap();
        }

        let tokens = service
            .tokens_for_owner(AttachmentKind::ActivityImage, 5)
            .await
            .unwrap();
        assert_eq!(tokens.len(), 4);
    }

    #[tokio::test]
    async fn test_remove_deletes_file_and_row() {
        let storage = Arc::new(MemoryStorage::new());
        let store = Arc::new(MemoryAttachmentStore::new());
        let service = AttachmentService::new(store.clone(), storage.clone());

        let created = service
            .add(AttachmentKind::NewsImage, None, "cover.jpg", Bytes::from("x"))
            .await
            .unwrap();

        let removed = service
            .remove(AttachmentKind::NewsImage, None, &created.file_token)
            .await
            .unwrap();
        assert_eq!(removed.file_token, created.file_token);

        assert_eq!(storage.len().await, 0);
        assert_eq!(store.len().await, 0);

        let result = service
            .download(AttachmentKind::NewsImage, None, &created.file_token)
            .await;
        assert!(matches!(result, Err(AttachmentError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_failed_file_delete_keeps_row() {
        let storage = Arc::new(MemoryStorage::new());
        let store = Arc::new(MemoryAttachmentStore::new());
        let service = AttachmentService::new(store.clone(), storage.clone());

        let created = service
            .add(AttachmentKind::MemberImage, Some(1), "gone.png", Bytes::from("x"))
            .await
            .unwrap();

        // Simulate an out-of-band file loss
        storage.delete(&created.storage_key()).await.unwrap();

        let result = service
            .remove(AttachmentKind::MemberImage, Some(1), &created.file_token)
            .await;
        assert!(matches!(result, Err(AttachmentError::Storage(_))));

        // The row survives the aborted delete
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_token_resolves_only_for_its_owner() {
        let storage = Arc::new(MemoryStorage::new());
        let store = Arc::new(MemoryAttachmentStore::new());
        let service = AttachmentService::new(store.clone(), storage.clone());

        let created = service
            .add(AttachmentKind::ActivityImage, Some(2), "theirs.jpg", Bytes::from("x"))
            .await
            .unwrap();

        // A different owner's URL must not reach the attachment
        let result = service
            .download(AttachmentKind::ActivityImage, Some(1), &created.file_token)
            .await;
        assert!(matches!(result, Err(AttachmentError::NotFound(_))));

        let result = service
            .remove(AttachmentKind::ActivityImage, Some(1), &created.file_token)
            .await;
        assert!(matches!(result, Err(AttachmentError::NotFound(_))));

        // Nothing was deleted through the mismatched owner
        assert_eq!(storage.len().await, 1);
        assert_eq!(store.len().await, 1);

        // The owner named on the record still can delete it
        service
            .remove(AttachmentKind::ActivityImage, Some(2), &created.file_token)
            .await
            .unwrap();
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_unowned_token_rejected_under_an_owner() {
        let service = service();
        let created = service
            .add(AttachmentKind::NewsImage, None, "cover.png", Bytes::from("n"))
            .await
            .unwrap();

        let result = service
            .download(AttachmentKind::NewsImage, Some(3), &created.file_token)
            .await;
        assert!(matches!(result, Err(AttachmentError::NotFound(_))));

        let (record, _) = service
            .download(AttachmentKind::NewsImage, None, &created.file_token)
            .await
            .unwrap();
        assert_eq!(record.file_token, created.file_token);
    }

    #[tokio::test]
    async fn test_cascade_removes_all_files_and_rows() {
        let storage = Arc::new(MemoryStorage::new());
        let store = Arc::new(MemoryAttachmentStore::new());
        let service = AttachmentService::new(store.clone(), storage.clone());

        for i in 0..3 {
            service
                .add(
                    AttachmentKind::ActivityImage,
                    Some(9),
                    &format!("act{i}.jpg"),
                    Bytes::from("y"),
                )
                .await
                .unwrap();
        }
        // Another owner's image survives the cascade
        service
            .add(AttachmentKind::ActivityImage, Some(10), "other.jpg", Bytes::from("z"))
            .await
            .unwrap();

        let removed = service
            .remove_all_for_owner(AttachmentKind::ActivityImage, 9)
            .await
            .unwrap();
        assert_eq!(removed, 3);
        assert_eq!(storage.len().await, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unowned_kinds_listed_globally() {
        let service = service();
        service
            .add(AttachmentKind::NewsImage, None, "a.png", Bytes::from("1"))
            .await
            .unwrap();
        service
            .add(AttachmentKind::NewsImage, None, "b.png", Bytes::from("2"))
            .await
            .unwrap();
        service
            .add(AttachmentKind::ProjectTaskImage, None, "c.png", Bytes::from("3"))
            .await
            .unwrap();

        let news = service.list_all(AttachmentKind::NewsImage).await.unwrap();
        assert_eq!(news.len(), 2);
        assert_eq!(news[0].filename, "a.png");
        assert_eq!(news[1].filename, "b.png");
    }
}
