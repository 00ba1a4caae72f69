//! Paginator: fixed-size pages over the filtered view.
//!
//! RULE: No page request is ever an error. A stale or out-of-range
//! page yields an empty slice; navigation at a boundary is a no-op.

use serde::{Deserialize, Serialize};
use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// ceil(len / page_size); 0 for an empty view or a zero page size.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Index range of `current_page` (1-based), clamped to [0, len).
/// Page 0 is read as page 1.
pub fn page_bounds(len: usize, page_size: usize, current_page: usize) -> Range<usize> {
    let page = current_page.max(1);
    let start = (page - 1).saturating_mul(page_size).min(len);
    let end = page.saturating_mul(page_size).min(len);
    start..end
}

/// The records on `current_page`. Never panics, never out of range.
pub fn page<T>(filtered: &[T], page_size: usize, current_page: usize) -> &[T] {
    &filtered[page_bounds(filtered.len(), page_size, current_page)]
}

/// 1-based "Showing first to last of total" bounds for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub first: usize,
    pub last:  usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub page_size:    usize,
    pub current_page: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self { page_size, current_page: 1 }
    }

    pub fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }

    pub fn bounds(&self, len: usize) -> Range<usize> {
        page_bounds(len, self.page_size, self.current_page)
    }

    pub fn slice<'a, T>(&self, filtered: &'a [T]) -> &'a [T] {
        page(filtered, self.page_size, self.current_page)
    }

    /// None when the current page holds nothing.
    pub fn window(&self, len: usize) -> Option<PageWindow> {
        let bounds = self.bounds(len);
        if bounds.is_empty() {
            return None;
        }
        Some(PageWindow { first: bounds.start + 1, last: bounds.end, total: len })
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Returns true if the page moved.
    pub fn next(&mut self, len: usize) -> bool {
        if self.current_page < self.total_pages(len) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Returns true if the page moved.
    pub fn previous(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page`, clamped into [1, max(total_pages, 1)].
    pub fn go_to(&mut self, page: usize, len: usize) {
        let last = self.total_pages(len).max(1);
        self.current_page = page.clamp(1, last);
    }
}
