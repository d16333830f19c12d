use validator::ValidationError;

/// Rejects strings that are empty after trimming. Paired with `required` on
/// optional request fields so a missing and a blank value read the same.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Trimmed value, or `None` when absent or blank.
pub(crate) fn trimmed_optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
