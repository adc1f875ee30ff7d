//! Wishlist naming rules and toggle outcomes.

use serde::Serialize;

use crate::error::CoreError;

/// Maximum wishlist title length.
pub const MAX_TITLE_LENGTH: usize = 255;

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Wishlist title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Wishlist title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// What a membership toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Added,
    Removed,
}

impl ToggleAction {
    /// User-facing confirmation, e.g. "Added to Favourites".
    pub fn message(self, wishlist_title: &str) -> String {
        match self {
            ToggleAction::Added => format!("Added to {wishlist_title}"),
            ToggleAction::Removed => format!("Removed from {wishlist_title}"),
        }
    }
}
