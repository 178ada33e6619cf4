//! News payloads

use lab_core::error::ValidationErrors;
use serde::Deserialize;

use crate::validate::check_required;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNews {
    pub news_title: Option<String>,
    pub news_sub_title: Option<String>,
    pub news_content: Option<String>,
}

impl CreateNews {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        check_required(&[
            ("news_title", self.news_title.as_deref()),
            ("news_sub_title", self.news_sub_title.as_deref()),
            ("news_content", self.news_content.as_deref()),
        ])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNews {
    pub news_title: Option<String>,
    pub news_sub_title: Option<String>,
    pub news_content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_required() {
        let payload = CreateNews {
            news_title: Some("title".into()),
            news_sub_title: None,
            news_content: None,
        };
        let err = payload.validate().unwrap_err();
        assert!(err.has_error("news_sub_title"));
        assert!(err.has_error("news_content"));
    }
}
