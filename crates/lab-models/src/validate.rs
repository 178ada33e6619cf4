//! Required-field validation helpers

use lab_core::error::ValidationErrors;

/// Collect every required field that is absent or empty into one
/// [`ValidationErrors`]. Returns `Ok(())` when all are present.
pub(crate) fn check_required(
    fields: &[(&'static str, Option<&str>)],
) -> Result<(), ValidationErrors> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors::missing_fields(&missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_present() {
        let result = check_required(&[("a", Some("x")), ("b", Some("y"))]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_missing_and_empty() {
        let err = check_required(&[("a", None), ("b", Some("  ")), ("c", Some("ok"))])
            .unwrap_err();
        assert!(err.has_error("a"));
        assert!(err.has_error("b"));
        assert!(!err.has_error("c"));
    }
}
