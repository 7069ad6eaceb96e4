//! Page-based listing parameters and the listing envelope.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Page size when the client sends none.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: i64 = 200;

/// A validated `page` / `pageSize` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build from raw query values. Only the leading integer of each value
    /// counts (`"2abc"` is 2, `"1.5"` is 1). Missing or non-numeric values
    /// take the defaults; `page` is at least 1 and `pageSize` is clamped to
    /// `1..=MAX_PAGE_SIZE`.
    pub fn from_raw(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page = parse_int(page).unwrap_or(1).max(1);
        let page_size = parse_int(page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        Self { page, page_size }
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Rows in this page.
    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// Number of pages needed for `total` rows.
pub fn page_count(total: i64, page_size: i64) -> i64 {
    if total <= 0 || page_size <= 0 {
        0
    } else {
        (total + page_size - 1) / page_size
    }
}

/// `{ items, total, page, pageSize, pages }` listing envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
            pages: page_count(total, request.page_size),
        }
    }
}

static LEADING_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("valid regex"));

fn parse_int(raw: Option<&str>) -> Option<i64> {
    let found = LEADING_INT_RE.find(raw?.trim_start())?;
    found.as_str().parse().ok()
}
