//! Slug disambiguation shared by tables with a unique `slug` column.

use emporium_core::slug::next_available_slug;
use sqlx::PgPool;

/// Escape `%`, `_` and `\` so `base` matches literally inside `LIKE`.
fn escape_like(base: &str) -> String {
    let mut out = String::with_capacity(base.len());
    for c in base.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Return `base` or the first free `base-N` variant in `table`.
///
/// `table` must be a trusted identifier, never user input.
pub(crate) async fn unique_slug(
    pool: &PgPool,
    table: &str,
    base: &str,
) -> Result<String, sqlx::Error> {
    let query = format!("SELECT slug FROM {table} WHERE slug = $1 OR slug LIKE $2");
    let taken: Vec<String> = sqlx::query_scalar(&query)
        .bind(base)
        .bind(format!("{}-%", escape_like(base)))
        .fetch_all(pool)
        .await?;
    Ok(next_available_slug(base, &taken))
}
