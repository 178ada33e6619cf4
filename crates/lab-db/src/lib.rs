//! # lab-db
//!
//! Database layer for Lab Site RS: the Postgres pool, migrations, one
//! repository per resource kind, the task repository, and the Postgres
//! attachment store.

pub mod activities;
pub mod attachments;
pub mod members;
pub mod migration;
pub mod news;
pub mod papers;
pub mod pool;
pub mod projects;
pub mod repository;
pub mod tasks;

pub use activities::{ActivityRepository, ActivityRow};
pub use attachments::PgAttachmentStore;
pub use members::{MemberRepository, MemberRow};
pub use migration::run_migrations;
pub use news::{NewsRepository, NewsRow};
pub use papers::{PaperRepository, PaperRow};
pub use pool::{Database, DatabaseConfig};
pub use projects::{ProjectRepository, ProjectRow};
pub use repository::{RepositoryError, RepositoryResult};
pub use tasks::{TaskRepository, TaskRow};
