//! Query-string handling shared by the searchable list endpoints.
//!
//! List handlers take the raw `Query<HashMap<String, String>>` so that the
//! declared filter fields of each list can be picked out by name; this module
//! pulls the common `search`, `page` and flag parameters out of that map.

use std::collections::HashMap;

use emporium_core::pagination::PageRequest;

/// Common list parameters plus the remaining raw values for filters.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub search: Option<String>,
    pub page: PageRequest,
    pub raw: HashMap<String, String>,
}

impl ListParams {
    pub fn from_query(raw: HashMap<String, String>, page_size: i64) -> Self {
        let page = PageRequest::from_param(raw.get("page").map(String::as_str), page_size);
        let search = raw.get("search").cloned();
        Self { search, page, raw }
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// A boolean flag: `true`, `1`, `yes` and `on` are truthy (case-insensitive).
    pub fn flag(&self, name: &str) -> bool {
        self.raw.get(name).is_some_and(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            )
        })
    }
}
