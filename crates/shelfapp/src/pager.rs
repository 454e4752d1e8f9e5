//! # Pager
//!
//! Slices a sequence into fixed-size pages.
//!
//! - `total_pages = ceil(len / page_size)`, but never less than 1, so an empty
//!   list is a well-formed "page 1 of 1".
//! - Requested pages are clamped into `[1, total_pages]`; asking for page 999
//!   of 3 yields page 3, asking for page 0 yields page 1.
//! - The window for page `p` is `[(p - 1) * size, p * size)`.
//!
//! [`PageCursor`] keeps the current page between renders and jumps back to
//! page 1 whenever the *length* of the paged sequence changes. A change of
//! content with the same length keeps the current page.

use std::ops::RangeInclusive;

/// Books per page.
pub const PAGE_SIZE: usize = 10;

/// How many page numbers a pagination bar shows at most.
const MAX_VISIBLE_PAGES: usize = 5;

#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl<T> Page<'_, T> {
    /// A single page needs no pagination controls.
    pub fn needs_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// 1-based position of the first item on this page, 0 when empty.
    pub fn first_item(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            (self.current_page - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last item on this page, 0 when empty.
    pub fn last_item(&self) -> usize {
        (self.current_page * self.page_size).min(self.total_items)
    }

    /// Page numbers to offer around the current page, at most five,
    /// shifted so the window never leaves `[1, total_pages]`.
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        let half = MAX_VISIBLE_PAGES / 2;
        let mut start = self.current_page.saturating_sub(half).max(1);
        let end = (start + MAX_VISIBLE_PAGES - 1).min(self.total_pages);
        if end + 1 - start < MAX_VISIBLE_PAGES {
            start = (end + 1).saturating_sub(MAX_VISIBLE_PAGES).max(1);
        }
        start..=end
    }
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// The `requested` page of `items`, clamped into range.
pub fn paginate<T>(items: &[T], page_size: usize, requested: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let current_page = requested.clamp(1, total_pages);

    let start = ((current_page - 1) * page_size).min(items.len());
    let end = (current_page * page_size).min(items.len());

    Page {
        items: &items[start..end],
        current_page,
        total_pages,
        total_items: items.len(),
        page_size,
    }
}

/// Remembers the selected page across renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    page: usize,
    last_len: Option<usize>,
    page_size: usize,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCursor {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page: 1,
            last_len: None,
            page_size: page_size.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.page
    }

    /// Selects a page; it is clamped on the next [`PageCursor::page`].
    pub fn go_to(&mut self, page: usize) {
        self.page = page;
    }

    /// The current page of `items`.
    pub fn page<'a, T>(&mut self, items: &'a [T]) -> Page<'a, T> {
        if self.last_len != Some(items.len()) {
            if self.last_len.is_some() {
                self.page = 1;
            }
            self.last_len = Some(items.len());
        }
        let page = paginate(items, self.page_size, self.page);
        self.page = page.current_page;
        page
    }
}
