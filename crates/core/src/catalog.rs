//! Antique listing rules: field validation, image limits, purchase checks.

use crate::error::CoreError;
use crate::types::Cents;

/// Maximum number of images attached to a single antique.
pub const MAX_IMAGES_PER_ANTIQUE: usize = 10;

/// Maximum title length (matches the `title` column).
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum length of the antique type and dimensions fields.
pub const MAX_SHORT_FIELD_LENGTH: usize = 100;

/// Validate a listing title (non-empty, <= 255 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a price in minor units.
pub fn validate_price(price_cents: Cents) -> Result<(), CoreError> {
    if price_cents < 0 {
        return Err(CoreError::Validation("Price must not be negative".into()));
    }
    Ok(())
}

/// Validate a stock quantity.
pub fn validate_quantity(quantity: i32) -> Result<(), CoreError> {
    if quantity < 0 {
        return Err(CoreError::Validation("Quantity must not be negative".into()));
    }
    Ok(())
}

/// Validate the antique type (required) or dimensions (optional) text.
pub fn validate_short_field(field: &str, value: &str, required: bool) -> Result<(), CoreError> {
    if required && value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > MAX_SHORT_FIELD_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_SHORT_FIELD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Check that adding `adding` images to `existing` stays within the limit.
pub fn validate_image_count(existing: usize, adding: usize) -> Result<(), CoreError> {
    if existing + adding > MAX_IMAGES_PER_ANTIQUE {
        return Err(CoreError::Validation(format!(
            "Maximum {MAX_IMAGES_PER_ANTIQUE} images allowed. You have {existing} and are trying to add {adding} more."
        )));
    }
    Ok(())
}

/// Validate a single image reference.
pub fn validate_image_url(url: &str) -> Result<(), CoreError> {
    if url.trim().is_empty() {
        return Err(CoreError::Validation("Image URL must not be empty".into()));
    }
    Ok(())
}

/// Whether a freshly created listing should be registered with the payment
/// provider: it must have a price, be in stock, and not be registered yet.
pub fn should_register_product(price_cents: Cents, quantity: i32, has_product: bool) -> bool {
    price_cents > 0 && quantity > 0 && !has_product
}

/// Validate a checkout quantity against available stock.
pub fn validate_purchase_quantity(requested: i32, in_stock: i32) -> Result<(), CoreError> {
    if in_stock <= 0 {
        return Err(CoreError::Conflict("This antique has already been sold".into()));
    }
    if requested < 1 {
        return Err(CoreError::Validation("Quantity must be at least 1".into()));
    }
    if requested > in_stock {
        return Err(CoreError::Validation(format!(
            "Only {in_stock} available"
        )));
    }
    Ok(())
}

/// Stock left after selling `sold` units, floored at zero.
pub fn remaining_stock(current: i32, sold: i32) -> i32 {
    current.saturating_sub(sold).max(0)
}

/// Public path of a listing: `/antiques/{short_id}-{slug}/`.
pub fn antique_path(short_id: i64, slug: &str) -> String {
    format!("/antiques/{short_id}-{slug}/")
}
