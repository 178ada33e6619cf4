//! # lab-models
//!
//! Domain models for Lab Site RS: the create/update payloads for every
//! resource kind, required-field validation, and the attachment kind
//! taxonomy (owner, cardinality, asset class).

pub mod activity;
pub mod attachment_kind;
pub mod member;
pub mod news;
pub mod paper;
pub mod project;
pub mod task;
mod validate;

pub use activity::{CreateActivity, UpdateActivity};
pub use attachment_kind::{AssetClass, AttachmentKind, Cardinality, ResourceKind};
pub use member::{CreateMember, UpdateMember};
pub use news::{CreateNews, UpdateNews};
pub use paper::{CreatePaper, UpdatePaper};
pub use project::{CreateProject, UpdateProject};
pub use task::{CreateTask, UpdateTask, ROOT_PARENT_ID};
