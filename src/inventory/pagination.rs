// Server-side pagination policy. Page size is fixed per context and never
// taken from the client.

use serde::Serialize;

pub const MAX_PAGE: i64 = 1000;
pub const GENERAL_PAGE_SIZE: u64 = 12;
pub const PUBLIC_PAGE_SIZE: u64 = 9;

// A clamped page request, ready to turn into skip/limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub limit: u64,
}

impl PageWindow {
    pub fn new(page: Option<i64>, limit: u64) -> Self {
        let page = page.unwrap_or(1).clamp(1, MAX_PAGE) as u64;
        PageWindow { page, limit }
    }

    pub fn skip(&self) -> u64 {
        (self.page - 1) * self.limit
    }

    pub fn meta(&self, total: u64) -> PaginationMeta {
        let total_pages = if self.limit == 0 {
            0
        } else {
            total.div_ceil(self.limit)
        };
        PaginationMeta {
            page: self.page,
            limit: self.limit,
            total,
            total_pages,
            has_next_page: self.skip() + self.limit < total,
            has_prev_page: None,
        }
    }

    // Public listing variant, also reports whether a previous page exists
    pub fn public_meta(&self, total: u64) -> PaginationMeta {
        PaginationMeta {
            has_prev_page: Some(self.page > 1),
            ..self.meta(total)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_prev_page: Option<bool>,
}
