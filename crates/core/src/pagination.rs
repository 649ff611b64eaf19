//! Fixed-size paging over a filtered sequence.
//!
//! Page numbers are 1-indexed. Out-of-range navigation is a clamp, not an
//! error: callers check [`can_navigate`] and leave their state untouched when
//! it returns `false`.

use std::ops::Range;

use serde::Serialize;

/// Number of posts shown per list page
pub const POSTS_PER_PAGE: usize = 5;

/// Pagination metadata for list output
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
    pub next_page_command: Option<String>,
    pub prev_page_command: Option<String>,
}

impl PageInfo {
    /// Whether the listing needs pagination controls at all
    pub fn has_controls(&self) -> bool {
        self.total_items > self.page_size
    }
}

/// `ceil(total_items / page_size)`; zero for an empty sequence.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Whether `page` is a valid navigation target.
pub fn can_navigate(page: usize, total_pages: usize) -> bool {
    page >= 1 && page <= total_pages
}

/// Clamp a page number into `[1, max(1, total_pages)]` for display.
pub fn display_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Index range covered by `page`.
///
/// The last page may be shorter than `page_size`. A page beyond the end
/// yields an empty range rather than an error.
pub fn page_bounds(total_items: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= total_items {
        return total_items..total_items;
    }
    let end = start.saturating_add(page_size).min(total_items);
    start..end
}

/// Slice of `items` shown on `page`.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    &items[page_bounds(items.len(), page, page_size)]
}

/// Build pagination metadata with navigation commands.
///
/// `command` is the CLI invocation that reproduces the current view without
/// a `--page` flag; neighbouring pages append `--page N` to it.
pub fn build_page_info(
    total_items: usize,
    page: usize,
    page_size: usize,
    command: &str,
) -> PageInfo {
    let total_pages = total_pages(total_items, page_size);
    let current_page = display_page(page, total_pages);

    let next_page = if can_navigate(current_page + 1, total_pages) {
        Some(format!("{command} --page {}", current_page + 1))
    } else {
        None
    };

    let prev_page = if can_navigate(current_page.saturating_sub(1), total_pages) {
        Some(format!("{command} --page {}", current_page - 1))
    } else {
        None
    };

    PageInfo {
        current_page,
        total_pages,
        total_items,
        page_size,
        next_page_command: next_page,
        prev_page_command: prev_page,
    }
}
