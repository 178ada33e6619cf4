//! Attachment record

use chrono::{DateTime, Utc};
use lab_core::traits::{Id, Identifiable, Timestamped};
use lab_models::AttachmentKind;
use serde::{Deserialize, Serialize};

/// One uploaded file, tracked by a database row distinct from its storage
/// path. Clients reference it by `file_token`; the disk filename is an
/// internal detail that may be relocated without breaking external links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Option<Id>,
    pub kind: AttachmentKind,
    /// Owning resource id; `None` for globally listed kinds
    pub owner_id: Option<Id>,
    /// Opaque 128-bit random token, hex-encoded
    pub file_token: String,
    /// Original filename as uploaded (kept for content-disposition)
    pub filename: String,
    /// Filename on disk: `<token>.<ext>` (token alone when no extension)
    pub disk_filename: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Attachment {
    pub fn new(
        kind: AttachmentKind,
        owner_id: Option<Id>,
        file_token: impl Into<String>,
        filename: impl Into<String>,
        disk_filename: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            kind,
            owner_id,
            file_token: file_token.into(),
            filename: filename.into(),
            disk_filename: disk_filename.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Storage key relative to the storage root, partitioned by asset class
    pub fn storage_key(&self) -> String {
        format!(
            "{}/{}",
            self.kind.asset_class().dir_name(),
            self.disk_filename
        )
    }

    /// MIME type guessed from the stored filename
    pub fn content_type(&self) -> String {
        mime_guess::from_path(&self.disk_filename)
            .first_or_octet_stream()
            .to_string()
    }
}

impl Identifiable for Attachment {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Attachment {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_partitioned_by_class() {
        let image = Attachment::new(
            AttachmentKind::MemberImage,
            Some(1),
            "ab12",
            "photo.png",
            "ab12.png",
        );
        assert_eq!(image.storage_key(), "images/ab12.png");

        let attachment = Attachment::new(
            AttachmentKind::PaperAttachment,
            Some(1),
            "cd34",
            "paper.pdf",
            "cd34.pdf",
        );
        assert_eq!(attachment.storage_key(), "attachments/cd34.pdf");
    }

    #[test]
    fn test_content_type_from_disk_name() {
        let a = Attachment::new(
            AttachmentKind::NewsImage,
            None,
            "ef56",
            "cover.jpg",
            "ef56.jpg",
        );
        assert_eq!(a.content_type(), "image/jpeg");

        let b = Attachment::new(AttachmentKind::NewsImage, None, "0a1b", "blob", "0a1b");
        assert_eq!(b.content_type(), "application/octet-stream");
    }

    #[test]
    fn test_new_attachment_is_not_persisted() {
        let a = Attachment::new(AttachmentKind::MemberImage, Some(1), "t", "a.png", "t.png");
        assert!(!a.is_persisted());
        assert_eq!(a.created_at(), a.updated_at());
    }
}
