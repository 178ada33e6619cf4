//! # lab-attachments
//!
//! File attachment handling for Lab Site RS.
//!
//! ## Features
//!
//! - Storage abstraction (local filesystem, in-memory for tests)
//! - Opaque file token generation (the public reference is never the
//!   storage filename)
//! - Per-kind cardinality enforcement (at-most-one vs. many)
//! - Delete-file-then-row ordering so a failed file removal never leaves a
//!   row pointing at nothing

pub mod model;
pub mod service;
pub mod storage;

pub use model::Attachment;
pub use service::{
    AttachmentError, AttachmentResult, AttachmentService, AttachmentStore, MemoryAttachmentStore,
};
pub use storage::{
    disk_filename_for, generate_file_token, sanitize_extension, LocalStorage, MemoryStorage,
    Storage, StorageError, StorageResult,
};
