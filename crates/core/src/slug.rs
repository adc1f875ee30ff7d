//! URL slug generation and disambiguation.
//!
//! Antiques and blog posts get a slug derived from their title when none is
//! supplied. Slugs are unique per table, so a generated slug that is already
//! taken gets a numeric suffix (`-1`, `-2`, ...).

use crate::error::CoreError;

/// Base used when a title contains no sluggable characters at all.
const FALLBACK_SLUG: &str = "untitled";

/// Maximum slug length accepted by the `slug` columns.
pub const MAX_SLUG_LENGTH: usize = 255;

/// Generate a URL-safe slug from a title.
///
/// Accented and other non-ASCII letters are transliterated (`é` -> `e`),
/// then the result is lowercased, runs of anything else become one hyphen,
/// and leading/trailing hyphens are trimmed.
pub fn generate_slug(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    let mut prev_hyphen = false;
    for c in transliterate(title).to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            result.push('-');
            prev_hyphen = true;
        }
    }

    let trimmed = result.trim_matches('-');
    // Leave room for a disambiguation suffix.
    let mut slug: String = trimmed.chars().take(MAX_SLUG_LENGTH - 12).collect();
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Replace non-ASCII letters and digits with their ASCII spelling.
/// Symbols and punctuation pass through untouched.
fn transliterate(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii() || !c.is_alphanumeric() {
            out.push(c);
        } else if let Some(ascii) = deunicode::deunicode_char(c) {
            out.push_str(ascii);
        }
    }
    out
}

/// Validate a caller-supplied slug (non-empty, lowercase alphanumeric + hyphens).
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LENGTH} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}

/// Pick the first free slug of the form `base`, `base-1`, `base-2`, ...
///
/// `taken` holds the slugs already in use that start with `base`; the
/// repository layer fetches them with a prefix query.
pub fn next_available_slug(base: &str, taken: &[String]) -> String {
    let base = if base.is_empty() { FALLBACK_SLUG } else { base };

    if !taken.iter().any(|s| s == base) {
        return base.to_string();
    }

    let mut counter: u32 = 1;
    loop {
        let candidate = format!("{base}-{counter}");
        if !taken.iter().any(|s| *s == candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Derive a seller slug from the account username.
///
/// Seller slugs mirror the username: lowercased with spaces turned into hyphens.
pub fn seller_slug(username: &str) -> String {
    username.trim().to_lowercase().replace(' ', "-")
}
