//! Blog post status values, validation, and reading-time estimate.

use crate::error::CoreError;

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";

/// All valid blog post statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_PUBLISHED];

/// Average reading speed used for the reading-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// Maximum topic length (matches the `topic` column).
pub const MAX_TOPIC_LENGTH: usize = 100;

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

pub fn validate_topic(topic: &str) -> Result<(), CoreError> {
    if topic.chars().count() > MAX_TOPIC_LENGTH {
        return Err(CoreError::Validation(format!(
            "Topic must be at most {MAX_TOPIC_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Whether a post with `status` may be shown to a caller.
///
/// Drafts are only visible to superusers.
pub fn is_visible(status: &str, is_superuser: bool) -> bool {
    is_superuser || status == STATUS_PUBLISHED
}

/// Estimated reading time in whole minutes, never less than one.
pub fn reading_time_minutes(content: Option<&str>) -> usize {
    let words = content.map(|c| c.split_whitespace().count()).unwrap_or(0);
    (words / WORDS_PER_MINUTE).max(1)
}
