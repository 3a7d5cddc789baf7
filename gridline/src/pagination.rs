//! Pagination.
//!
//! Pure derivation from `(page, page_size, total)`. The controller never
//! clamps the page; it only refuses to navigate past the boundaries.

use serde::{Deserialize, Serialize};

/// Caller-owned pagination state. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl Pagination {
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        Self {
            page,
            page_size,
            total,
        }
    }

    /// Derived display values.
    pub fn info(&self) -> PageInfo {
        PageInfo::derive(self)
    }

    /// Index range of the current page within the full data set.
    pub fn slice_range(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.page.saturating_sub(1).saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size);
        start.min(len)..end.min(len)
    }
}

/// Values derived from [`Pagination`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub total_pages: usize,
    pub start_item: usize,
    pub end_item: usize,
    pub can_go_prev: bool,
    pub can_go_next: bool,
}

impl PageInfo {
    pub fn derive(p: &Pagination) -> Self {
        let total_pages = if p.page_size == 0 {
            0
        } else {
            p.total.div_ceil(p.page_size)
        };
        let start_item = if p.total == 0 {
            0
        } else {
            p.page
                .saturating_sub(1)
                .saturating_mul(p.page_size)
                .saturating_add(1)
        };
        let end_item = p.page.saturating_mul(p.page_size).min(p.total);
        Self {
            total_pages,
            start_item,
            end_item,
            can_go_prev: p.page > 1,
            can_go_next: p.page < total_pages,
        }
    }

    /// Footer summary, e.g. `21-30 of 37`.
    pub fn summary(&self, total: usize) -> String {
        format!("{}-{} of {}", self.start_item, self.end_item, total)
    }
}

/// A page change to hand to `on_pagination_change`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

/// Navigation over a [`Pagination`] snapshot.
#[derive(Debug, Clone, Copy)]
pub struct PaginationController {
    state: Pagination,
    info: PageInfo,
}

impl PaginationController {
    pub fn new(state: Pagination) -> Self {
        Self {
            info: state.info(),
            state,
        }
    }

    pub fn info(&self) -> PageInfo {
        self.info
    }

    pub fn prev(&self) -> Option<PageRequest> {
        self.info
            .can_go_prev
            .then(|| self.request(self.state.page - 1))
    }

    pub fn next(&self) -> Option<PageRequest> {
        self.info
            .can_go_next
            .then(|| self.request(self.state.page + 1))
    }

    pub fn first(&self) -> Option<PageRequest> {
        self.info.can_go_prev.then(|| self.request(1))
    }

    pub fn last(&self) -> Option<PageRequest> {
        self.info
            .can_go_next
            .then(|| self.request(self.info.total_pages))
    }

    /// Request `page` as given; clamping is the caller's call.
    pub fn go_to(&self, page: usize) -> PageRequest {
        self.request(page)
    }

    /// Change the page size, restarting at page 1.
    pub fn set_page_size(&self, page_size: usize) -> PageRequest {
        PageRequest { page: 1, page_size }
    }

    fn request(&self, page: usize) -> PageRequest {
        PageRequest {
            page,
            page_size: self.state.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_range() {
        assert_eq!(Pagination::new(1, 5, 8).slice_range(8), 0..5);
        assert_eq!(Pagination::new(2, 5, 8).slice_range(8), 5..8);
        assert_eq!(Pagination::new(4, 5, 8).slice_range(8), 8..8);
        assert_eq!(Pagination::new(0, 5, 8).slice_range(8), 0..5);
    }

    #[test]
    fn test_huge_page_saturates() {
        let info = Pagination::new(usize::MAX, 5, 10).info();
        assert_eq!(info.total_pages, 2);
        assert_eq!(info.start_item, usize::MAX);
        assert_eq!(info.end_item, 10);
        assert!(info.can_go_prev);
        assert!(!info.can_go_next);
    }

    #[test]
    fn test_zero_page_size() {
        let info = Pagination::new(1, 0, 10).info();
        assert_eq!(info.total_pages, 0);
        assert!(!info.can_go_next);
    }
}
