//! Member payloads

use lab_core::error::ValidationErrors;
use serde::Deserialize;

use crate::validate::check_required;

/// Payload for creating a member. All three fields are required.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMember {
    pub member_name: Option<String>,
    pub member_intro: Option<String>,
    pub member_character: Option<String>,
}

impl CreateMember {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        check_required(&[
            ("member_name", self.member_name.as_deref()),
            ("member_intro", self.member_intro.as_deref()),
            ("member_character", self.member_character.as_deref()),
        ])
    }
}

/// Partial-update payload. Only fields present in the request are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMember {
    pub member_name: Option<String>,
    pub member_intro: Option<String>,
    pub member_character: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_valid() {
        let payload = CreateMember {
            member_name: Some("Ada".into()),
            member_intro: Some("intro".into()),
            member_character: Some("professor".into()),
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_create_missing_fields() {
        let payload = CreateMember {
            member_name: Some("Ada".into()),
            member_intro: None,
            member_character: Some("".into()),
        };
        let err = payload.validate().unwrap_err();
        assert!(err.has_error("member_intro"));
        assert!(err.has_error("member_character"));
        assert!(!err.has_error("member_name"));
    }
}
