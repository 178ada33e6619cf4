//! Project task payloads
//!
//! Tasks form a tree within one project. `parent_id = 0` marks a root-level
//! task; the virtual root never corresponds to a stored row.

use lab_core::error::ValidationErrors;
use lab_core::traits::Id;
use serde::Deserialize;

use crate::validate::check_required;

/// Sentinel parent id marking a root-level task
pub const ROOT_PARENT_ID: Id = 0;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    /// Defaults to [`ROOT_PARENT_ID`] when absent
    pub parent_id: Option<Id>,
}

impl CreateTask {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        check_required(&[("title", self.title.as_deref())])
    }

    pub fn parent_or_root(&self) -> Id {
        self.parent_id.unwrap_or(ROOT_PARENT_ID)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub parent_id: Option<Id>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_required() {
        let payload = CreateTask {
            title: None,
            subtitle: None,
            content: None,
            parent_id: None,
        };
        assert!(payload.validate().unwrap_err().has_error("title"));
    }

    #[test]
    fn test_parent_defaults_to_root() {
        let payload = CreateTask {
            title: Some("t".into()),
            subtitle: None,
            content: None,
            parent_id: None,
        };
        assert_eq!(payload.parent_or_root(), ROOT_PARENT_ID);
    }
}
