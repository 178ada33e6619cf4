//! Activity payloads

use lab_core::error::ValidationErrors;
use serde::Deserialize;

use crate::validate::check_required;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivity {
    pub activity_title: Option<String>,
    pub activity_sub_title: Option<String>,
}

impl CreateActivity {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        check_required(&[("activity_title", self.activity_title.as_deref())])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateActivity {
    pub activity_title: Option<String>,
    pub activity_sub_title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_required() {
        let payload = CreateActivity {
            activity_title: None,
            activity_sub_title: Some("sub".into()),
        };
        assert!(payload.validate().unwrap_err().has_error("activity_title"));
    }
}
