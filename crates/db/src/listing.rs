//! Searchable, filterable, paginated list queries.
//!
//! Each list endpoint declares a [`ListSpec`] (table, columns, searchable
//! text columns, equality filters, default ordering). A [`ListQuery`] is then
//! built per request from the `search` term, the raw query-string filters and
//! any narrowing the handler applies (owner scoping, hiding sold items, ...).
//!
//! Placeholders are numbered in the order conditions are added; the search
//! term occupies a single placeholder reused across all search columns.

use std::collections::HashMap;

use emporium_core::pagination::{like_pattern, normalize_search, Page, PageRequest};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres};

/// Static description of a searchable list.
#[derive(Debug, Clone, Copy)]
pub struct ListSpec {
    pub table: &'static str,
    pub columns: &'static str,
    /// Text columns matched disjunctively with `ILIKE`.
    pub search_fields: &'static [&'static str],
    /// `(query param, column)` pairs applied as equality filters.
    pub filter_fields: &'static [(&'static str, &'static str)],
    /// `ORDER BY` expression.
    pub ordering: &'static str,
}

/// A value bound to one placeholder of a list query.
#[derive(Debug, Clone, PartialEq)]
pub enum ListBind {
    Text(String),
    Int(i64),
    Bool(bool),
}

/// A list query under construction.
#[derive(Debug, Clone)]
pub struct ListQuery {
    spec: ListSpec,
    conditions: Vec<String>,
    binds: Vec<ListBind>,
}

impl ListQuery {
    pub fn new(spec: ListSpec) -> Self {
        Self {
            spec,
            conditions: Vec::new(),
            binds: Vec::new(),
        }
    }

    fn next_idx(&self) -> usize {
        self.binds.len() + 1
    }

    /// Apply a free-text search over the declared search fields.
    ///
    /// Blank or absent terms leave the query unchanged.
    pub fn search(mut self, term: Option<&str>) -> Self {
        let Some(term) = normalize_search(term) else {
            return self;
        };
        if self.spec.search_fields.is_empty() {
            return self;
        }
        let idx = self.next_idx();
        let ors: Vec<String> = self
            .spec
            .search_fields
            .iter()
            .map(|col| format!("{col} ILIKE ${idx}"))
            .collect();
        self.conditions.push(format!("({})", ors.join(" OR ")));
        self.binds.push(ListBind::Text(like_pattern(term)));
        self
    }

    /// Apply the declared equality filters present (and non-blank) in `params`.
    ///
    /// Unknown parameters are ignored.
    pub fn filters(mut self, params: &HashMap<String, String>) -> Self {
        for (param, column) in self.spec.filter_fields {
            let Some(value) = params.get(*param).map(|v| v.trim()) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            let idx = self.next_idx();
            self.conditions.push(format!("{column} = ${idx}"));
            self.binds.push(ListBind::Text(value.to_string()));
        }
        self
    }

    /// Add an equality restriction chosen by the handler rather than the caller.
    pub fn narrow(mut self, column: &str, value: ListBind) -> Self {
        let idx = self.next_idx();
        self.conditions.push(format!("{column} = ${idx}"));
        self.binds.push(value);
        self
    }

    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// `SELECT` for one page; `LIMIT`/`OFFSET` take the two placeholders after the binds.
    pub fn select_sql(&self) -> String {
        let limit_idx = self.next_idx();
        let offset_idx = limit_idx + 1;
        format!(
            "SELECT {columns} FROM {table}{where_clause} ORDER BY {ordering} \
             LIMIT ${limit_idx} OFFSET ${offset_idx}",
            columns = self.spec.columns,
            table = self.spec.table,
            where_clause = self.where_clause(),
            ordering = self.spec.ordering,
        )
    }

    pub fn count_sql(&self) -> String {
        format!(
            "SELECT COUNT(*) FROM {table}{where_clause}",
            table = self.spec.table,
            where_clause = self.where_clause(),
        )
    }

    pub fn binds(&self) -> &[ListBind] {
        &self.binds
    }

    /// Run the count and page queries and assemble a [`Page`].
    pub async fn fetch_page<T>(
        &self,
        pool: &PgPool,
        request: PageRequest,
    ) -> Result<Page<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let count_sql = self.count_sql();
        let mut count_q = sqlx::query_scalar::<Postgres, i64>(&count_sql);
        for bind in &self.binds {
            count_q = match bind {
                ListBind::Text(v) => count_q.bind(v.clone()),
                ListBind::Int(v) => count_q.bind(*v),
                ListBind::Bool(v) => count_q.bind(*v),
            };
        }
        let total = count_q.fetch_one(pool).await?;

        let select_sql = self.select_sql();
        let mut q = sqlx::query_as::<Postgres, T>(&select_sql);
        for bind in &self.binds {
            q = match bind {
                ListBind::Text(v) => q.bind(v.clone()),
                ListBind::Int(v) => q.bind(*v),
                ListBind::Bool(v) => q.bind(*v),
            };
        }
        let items = q
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, total, request))
    }
}
