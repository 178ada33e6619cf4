//! Project payloads
//!
//! `project_tags` travels as a JSON array over the API but is stored as one
//! encoded string column, so the payloads carry `Vec<String>` and the
//! repository encodes/decodes.

use lab_core::error::ValidationErrors;
use serde::Deserialize;

use crate::validate::check_required;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub project_name: Option<String>,
    pub project_description: Option<String>,
    pub project_link: Option<String>,
    pub project_github: Option<String>,
    pub project_tags: Option<Vec<String>>,
}

impl CreateProject {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        check_required(&[("project_name", self.project_name.as_deref())])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub project_name: Option<String>,
    pub project_description: Option<String>,
    pub project_link: Option<String>,
    pub project_github: Option<String>,
    pub project_tags: Option<Vec<String>>,
}

/// Encode tags for the string column
pub fn encode_tags(tags: &[String]) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

/// Decode the stored tags column. Unparseable or absent values decode to
/// `None`, matching the column's nullability.
pub fn decode_tags(raw: Option<&str>) -> Option<Vec<String>> {
    raw.and_then(|s| serde_json::from_str(s).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_required() {
        let payload = CreateProject {
            project_name: Some(" ".into()),
            project_description: None,
            project_link: None,
            project_github: None,
            project_tags: None,
        };
        assert!(payload.validate().unwrap_err().has_error("project_name"));
    }

    #[test]
    fn test_tags_round_trip() {
        let tags = vec!["nlp".to_string(), "ir".to_string()];
        let encoded = encode_tags(&tags);
        assert_eq!(decode_tags(Some(&encoded)), Some(tags));
        assert_eq!(decode_tags(None), None);
        assert_eq!(decode_tags(Some("not json")), None);
    }
}
