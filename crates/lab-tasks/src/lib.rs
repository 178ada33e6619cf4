//! # lab-tasks
//!
//! Assembly of a project's flat, parent-referencing task list into the
//! nested tree served by the API.

pub mod tree;

pub use tree::{build_task_tree, TaskNode, TaskRecord};
