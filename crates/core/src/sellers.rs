//! Seller profile validation.

use crate::error::CoreError;

/// Maximum store name length (matches the `store_name` column).
pub const MAX_STORE_NAME_LENGTH: usize = 255;

pub fn validate_store_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Store name must not be empty".into()));
    }
    if name.chars().count() > MAX_STORE_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Store name must be at most {MAX_STORE_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an optional contact email (a loose `local@domain` check).
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(CoreError::Validation(format!("Invalid email address '{email}'"))),
    }
}

/// Validate an optional social/website link.
pub fn validate_link(field: &str, url: &str) -> Result<(), CoreError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be an http(s) URL"
        )))
    }
}
