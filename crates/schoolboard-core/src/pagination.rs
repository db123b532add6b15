//! Pagination, search and sort parameters for list endpoints.
//!
//! List pages are page-based: `page` is 1-indexed and `limit` defaults to
//! [`ITEMS_PER_PAGE`]. `sort` names a column from a per-entity whitelist and
//! `order` is `asc` or `desc`; unknown sort keys fall back to the entity's
//! default ordering rather than failing the request.
//!
//! # Example
//!
//! ```ignore
//! // GET /list/teachers?page=2&search=ann&sort=name&order=desc
//! let column = params.sort_column(&[("name", "t.name"), ("id", "t.id")], "t.id");
//! let meta = PaginationMeta::new(total, &params.pagination());
//! ```

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::serde::{deserialize_optional_i64, deserialize_optional_string};

/// Default page size for list pages.
pub const ITEMS_PER_PAGE: i64 = 10;

const MAX_PAGE_SIZE: i64 = 100;

/// Highest page number honoured; keeps `offset + limit` within `i64`.
const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

/// Page-based pagination parameters.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PaginationParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl PaginationParams {
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).clamp(1, MAX_PAGE)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(ITEMS_PER_PAGE).clamp(1, MAX_PAGE_SIZE)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Common list query: free-text search, sort and pagination.
///
/// Entity-specific relation filters are separate `Query` extractors over the
/// same query string, so this struct stays flat.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Case-insensitive substring match on the entity's name/title columns
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    /// Column to sort by (entity specific)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub sort: Option<String>,
    #[serde(default)]
    pub order: Option<SortOrder>,
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl ListParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
    }

    /// `%term%` for ILIKE, with LIKE wildcards in the term escaped.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|term| {
            let escaped = term
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            format!("%{}%", escaped)
        })
    }

    /// Resolves `sort` against `allowed` (key, column) pairs.
    pub fn sort_column<'a>(&self, allowed: &[(&str, &'a str)], default: &'a str) -> &'a str {
        self.sort
            .as_deref()
            .and_then(|key| {
                allowed
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(key))
                    .map(|(_, column)| *column)
            })
            .unwrap_or(default)
    }

    pub fn order(&self) -> SortOrder {
        self.order.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(total: i64, params: &PaginationParams) -> Self {
        let limit = params.limit();
        let page = params.page();
        let total_pages = (total + limit - 1) / limit;
        Self {
            total,
            page,
            limit,
            total_pages,
            has_more: params.offset().saturating_add(limit) < total,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}
