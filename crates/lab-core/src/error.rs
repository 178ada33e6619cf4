//! Validation error collection shared by every payload type

use std::collections::HashMap;
use thiserror::Error;

/// Validation errors collection
#[derive(Error, Debug, Default, Clone)]
#[error("Validation errors: {errors:?}")]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: HashMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the canonical "missing required fields" error listing every
    /// absent or empty key.
    pub fn missing_fields(fields: &[&str]) -> Self {
        let mut errors = Self::new();
        for field in fields {
            errors.add(*field, "is required");
        }
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        let mut fields: Vec<_> = self.errors.iter().collect();
        fields.sort_by_key(|(field, _)| field.clone());
        for (field, field_messages) in fields {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields() {
        let errors = ValidationErrors::missing_fields(&["member_name", "member_intro"]);
        assert!(errors.has_error("member_name"));
        assert!(errors.has_error("member_intro"));
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_full_messages_sorted() {
        let mut errors = ValidationErrors::new();
        errors.add("b_field", "is required");
        errors.add("a_field", "is required");
        errors.add_base("something else");

        let messages = errors.full_messages();
        assert_eq!(
            messages,
            vec![
                "something else",
                "a_field is required",
                "b_field is required"
            ]
        );
    }

    #[test]
    fn test_merge() {
        let mut a = ValidationErrors::missing_fields(&["title"]);
        let mut b = ValidationErrors::new();
        b.add("title", "is too long");
        b.add_base("base problem");
        a.merge(b);

        assert_eq!(a.errors.get("title").map(Vec::len), Some(2));
        assert_eq!(a.base_errors.len(), 1);
    }
}
