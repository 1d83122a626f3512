//! Pagination and sorting types for list endpoints.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::config::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT, DESCENDING_SORT_PREFIX, MAX_PAGE_NUMBER,
    MAX_PAGE_SIZE,
};

/// Raw list query parameters, before a safelist is attached.
///
/// Integers are signed so that out-of-range values such as `page=-1`
/// surface as field errors from [`Filters::validate`], not as decode failures.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    /// Sort column, prefix with `-` for descending
    #[serde(default = "default_sort")]
    #[param(example = "-name")]
    pub sort: String,
}

fn default_page() -> i64 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn default_sort() -> String {
    DEFAULT_SORT.to_string()
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
            sort: DEFAULT_SORT.to_string(),
        }
    }
}

/// Sort order for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Validated-on-use paging and sorting for one list request.
///
/// `sort_safelist` is fixed per endpoint and is the only source of column
/// names that may reach a query.
#[derive(Debug, Clone)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    pub sort: String,
    pub sort_safelist: &'static [&'static str],
}

impl Filters {
    pub fn new(params: ListParams, sort_safelist: &'static [&'static str]) -> Self {
        Self {
            page: params.page,
            page_size: params.page_size,
            sort: params.sort,
            sort_safelist,
        }
    }

    /// Sort key without its direction prefix.
    pub fn sort_column(&self) -> &str {
        self.sort
            .strip_prefix(DESCENDING_SORT_PREFIX)
            .unwrap_or(&self.sort)
    }

    pub fn sort_direction(&self) -> SortDirection {
        if self.sort.starts_with(DESCENDING_SORT_PREFIX) {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    /// Rows per page. Zero for a negative page size.
    pub fn limit(&self) -> u64 {
        u64::try_from(self.page_size).unwrap_or(0)
    }

    /// Rows skipped before this page. Pages below 1 start at the top.
    pub fn offset(&self) -> u64 {
        u64::try_from(self.page.saturating_sub(1))
            .unwrap_or(0)
            .saturating_mul(self.limit())
    }
}

impl Validate for Filters {
    /// Checks every rule and reports all violations together.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !(1..=MAX_PAGE_NUMBER).contains(&self.page) {
            errors.add(
                "page",
                invalid("range", format!("must be between 1 and {}", MAX_PAGE_NUMBER)),
            );
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            errors.add(
                "page_size",
                invalid("range", format!("must be between 1 and {}", MAX_PAGE_SIZE)),
            );
        }

        if !self.sort_safelist.contains(&self.sort_column()) {
            errors.add(
                "sort",
                invalid(
                    "safelist",
                    format!("must be one of: {}", self.sort_safelist.join(", ")),
                ),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn invalid(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

/// Pagination metadata, derived from the windowed total of a list query.
///
/// The zero value means "no pages".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Metadata {
    pub current_page: i64,
    pub page_size: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub total_records: i64,
}

/// Build page metadata for `total_records` rows.
pub fn calculate_metadata(total_records: i64, page: i64, page_size: i64) -> Metadata {
    if total_records <= 0 || page_size <= 0 {
        return Metadata::default();
    }

    Metadata {
        current_page: page,
        page_size,
        first_page: 1,
        last_page: (total_records + page_size - 1) / page_size,
        total_records,
    }
}
