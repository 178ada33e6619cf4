//! Paper payloads

use lab_core::error::ValidationErrors;
use serde::Deserialize;

use crate::validate::check_required;

/// Payload for creating a paper. Only the title is required.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaper {
    pub paper_title: Option<String>,
    pub paper_publish_year: Option<i32>,
    pub paper_origin: Option<String>,
    pub paper_link: Option<String>,
    pub paper_tags: Option<String>,
    pub paper_authors: Option<String>,
}

impl CreatePaper {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        check_required(&[("paper_title", self.paper_title.as_deref())])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePaper {
    pub paper_title: Option<String>,
    pub paper_publish_year: Option<i32>,
    pub paper_origin: Option<String>,
    pub paper_link: Option<String>,
    pub paper_tags: Option<String>,
    pub paper_authors: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_required() {
        let payload = CreatePaper {
            paper_title: None,
            paper_publish_year: Some(2024),
            paper_origin: None,
            paper_link: None,
            paper_tags: None,
            paper_authors: None,
        };
        assert!(payload.validate().unwrap_err().has_error("paper_title"));
    }

    #[test]
    fn test_optional_fields_absent_is_fine() {
        let payload = CreatePaper {
            paper_title: Some("Deep Retrieval".into()),
            paper_publish_year: None,
            paper_origin: None,
            paper_link: None,
            paper_tags: None,
            paper_authors: None,
        };
        assert!(payload.validate().is_ok());
    }
}
