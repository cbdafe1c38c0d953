//! Pagination query parameters and page metadata.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// Effective pagination after defaulting and bounds checks.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedPage {
    pub page: u32,
    pub page_size: u32,
    pub offset: i64,
    pub limit: i64,
}

impl PaginationParams {
    /// Validates the parameters and resolves defaults.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `page_size`: 20
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Page size must be between 1 and 100
    pub fn validate_and_resolve(&self) -> Result<ResolvedPage, String> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(20);

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=100).contains(&page_size) {
            return Err("Page size must be between 1 and 100".to_string());
        }

        Ok(ResolvedPage {
            page,
            page_size,
            offset: i64::from((page - 1) * page_size),
            limit: i64::from(page_size),
        })
    }
}

/// Page metadata returned alongside list items.
#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
}
