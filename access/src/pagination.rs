//! Page arithmetic for paginated dashboard tables.

#[cfg(test)]
#[path = "pagination_test.rs"]
mod pagination_test;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// A 1-based page request, serialized as `?page=&limit=`.
///
/// Deserialization goes through [`Page::new`], so zero or missing values
/// never reach the arithmetic below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PageQuery")]
pub struct Page {
    #[serde(rename = "page")]
    number: u32,
    limit: u32,
}

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default)]
    page: u32,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl From<PageQuery> for Page {
    fn from(query: PageQuery) -> Self {
        Self::new(query.page, query.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_LIMIT)
    }
}

impl Page {
    /// Page `number` of `limit` rows; zero values are raised to 1.
    #[must_use]
    pub fn new(number: u32, limit: u32) -> Self {
        Self { number: number.max(1), limit: limit.max(1) }
    }

    #[must_use]
    pub fn number(self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn limit(self) -> u32 {
        self.limit
    }

    /// 1-based number shown in the `#` column for the row at `index`.
    #[must_use]
    pub fn row_number(self, index: usize) -> u64 {
        u64::from(self.number - 1) * u64::from(self.limit) + index as u64 + 1
    }

    /// Page count for `total_items`; an empty table still has one page.
    #[must_use]
    pub fn total_pages(self, total_items: u64) -> u32 {
        let pages = total_items.div_ceil(u64::from(self.limit)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn has_previous(self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub fn has_next(self, total_pages: u32) -> bool {
        self.number < total_pages
    }

    /// This page moved into `1..=total_pages`.
    #[must_use]
    pub fn clamped(self, total_pages: u32) -> Self {
        Self::new(self.number.min(total_pages.max(1)), self.limit)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::new(self.number.saturating_add(1), self.limit)
    }

    #[must_use]
    pub fn previous(self) -> Self {
        Self::new(self.number.saturating_sub(1), self.limit)
    }
}
