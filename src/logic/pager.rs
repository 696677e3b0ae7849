//! Page state applied to the filtered catalog before rendering.
//!
//! Pagination is a plain value passed around explicitly; the original
//! client kept it in an ambient context object, which is re-expressed here
//! as a field on `AppState` and function parameters. Slicing happens after
//! the catalog engine returns and never feeds back into filtering.

/// One-based page cursor plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    /// Current page, starting at 1.
    pub page: usize,
    /// Listings per page; never 0.
    pub page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: crate::util::config::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Width of the visible page-number window.
const PAGE_WINDOW: usize = 5;

impl Pager {
    /// What: Total number of pages for `total` entries.
    ///
    /// Output: `ceil(total / page_size)`, but at least 1 so an empty
    /// result set still renders page "1 / 1".
    #[must_use]
    pub const fn total_pages(&self, total: usize) -> usize {
        let size = if self.page_size == 0 { 1 } else { self.page_size };
        let pages = total.div_ceil(size);
        if pages == 0 { 1 } else { pages }
    }

    /// Reset to page one; called whenever filter criteria change.
    pub const fn reset(&mut self) {
        self.page = 1;
    }

    /// Move to the previous page, clamped at 1.
    pub const fn prev(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Move to the next page, clamped at the last page for `total` entries.
    pub const fn next(&mut self, total: usize) {
        if self.page < self.total_pages(total) {
            self.page += 1;
        }
    }

    /// Jump to an explicit page, clamped into range.
    pub const fn jump(&mut self, page: usize, total: usize) {
        let last = self.total_pages(total);
        self.page = if page == 0 {
            1
        } else if page > last {
            last
        } else {
            page
        };
    }

    /// What: Half-open index range of the current page over `total` entries.
    ///
    /// Output: `(start, end)` suitable for slicing the filtered sequence;
    /// `end` is clamped to `total`.
    #[must_use]
    pub const fn bounds(&self, total: usize) -> (usize, usize) {
        let start = (self.page - 1) * self.page_size;
        let start = if start > total { total } else { start };
        let end = start + self.page_size;
        let end = if end > total { total } else { end };
        (start, end)
    }

    /// Jump so that absolute row `index` is on the visible page.
    pub const fn follow(&mut self, index: usize, total: usize) {
        let size = if self.page_size == 0 { 1 } else { self.page_size };
        self.jump(index / size + 1, total);
    }

    /// What: Page numbers shown in the footer bar.
    ///
    /// Output: Up to [`PAGE_WINDOW`] consecutive page numbers centered on
    /// the current page, shifted to stay within `1..=total_pages` — the
    /// same window rule as the original page-number strip.
    #[must_use]
    pub fn window(&self, total: usize) -> Vec<usize> {
        let last = self.total_pages(total);
        let mut start = self.page.saturating_sub(PAGE_WINDOW / 2).max(1);
        let end = (start + PAGE_WINDOW - 1).min(last);
        if end + 1 > PAGE_WINDOW && end - start + 1 < PAGE_WINDOW {
            start = end + 1 - PAGE_WINDOW;
        }
        (start..=end).collect()
    }
}
