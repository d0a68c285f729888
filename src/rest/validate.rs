//! Required-attribute validation for mutating operations.

use super::errors::ResourceError;

/// Checks a list of `(attribute, is_set)` pairs and reports every missing
/// attribute at once.
///
/// # Errors
///
/// Returns [`ResourceError::MissingAttributes`] naming all attributes whose
/// flag is false.
pub fn require_set(
    resource: &'static str,
    fields: &[(&'static str, bool)],
) -> Result<(), ResourceError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, set)| !set)
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ResourceError::MissingAttributes {
            resource,
            fields: missing,
        })
    }
}
