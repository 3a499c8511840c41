//! Offset pagination helpers: page sizes, page windows and item ranges.

use std::fmt;

use thiserror::Error;

/// Page sizes offered by the page-size selector, in display order.
pub const PAGE_SIZE_CHOICES: [u32; 4] = [5, 10, 20, 50];

/// Pages shown on each side of the current page.
const WINDOW_RADIUS: u32 = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("unsupported page size {0}; expected one of 5, 10, 20, 50")]
    UnsupportedPageSize(u32),
}

/// A page size drawn from [`PAGE_SIZE_CHOICES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(u32);

impl PageSize {
    pub const DEFAULT: PageSize = PageSize(10);

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn choices() -> impl Iterator<Item = PageSize> {
        PAGE_SIZE_CHOICES.into_iter().map(PageSize)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for PageSize {
    type Error = PaginationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if PAGE_SIZE_CHOICES.contains(&value) {
            Ok(Self(value))
        } else {
            Err(PaginationError::UnsupportedPageSize(value))
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based page number together with the page size it was requested with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    page: u32,
    size: PageSize,
}

impl PageQuery {
    /// Page numbers below 1 are raised to 1.
    pub fn new(page: u32, size: PageSize) -> Self {
        Self {
            page: page.max(1),
            size,
        }
    }

    pub fn first(size: PageSize) -> Self {
        Self::new(1, size)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> PageSize {
        self.size
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::first(PageSize::DEFAULT)
    }
}

/// `ceil(total / size)`, saturating at `u32::MAX`.
pub fn total_pages(total: u64, size: PageSize) -> u32 {
    let pages = total.div_ceil(u64::from(size.get()));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowItem {
    Page { number: u32, current: bool },
    Ellipsis,
}

/// Pagination links around `current`.
///
/// Page 1 is anchored when more than two pages precede `current`, with an
/// ellipsis when the gap is wider than one page. The last page is anchored
/// the same way on the other side. Up to two pages are shown on each side of
/// `current`.
pub fn page_window(current: u32, total_pages: u32) -> Vec<WindowItem> {
    let mut items = Vec::new();

    if current > WINDOW_RADIUS + 1 {
        items.push(WindowItem::Page {
            number: 1,
            current: false,
        });
        if current > WINDOW_RADIUS + 2 {
            items.push(WindowItem::Ellipsis);
        }
    }

    let start = current.saturating_sub(WINDOW_RADIUS).max(1);
    let end = current.saturating_add(WINDOW_RADIUS).min(total_pages);
    for number in start..=end {
        items.push(WindowItem::Page {
            number,
            current: number == current,
        });
    }

    if current.saturating_add(WINDOW_RADIUS) < total_pages {
        if current.saturating_add(WINDOW_RADIUS + 1) < total_pages {
            items.push(WindowItem::Ellipsis);
        }
        items.push(WindowItem::Page {
            number: total_pages,
            current: false,
        });
    }

    items
}

/// The 1-based span of items shown on a page, out of `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRange {
    pub from: u64,
    pub to: u64,
    pub total: u64,
}

/// `None` when there is nothing to summarise.
pub fn item_range(query: PageQuery, total: u64) -> Option<ItemRange> {
    if total == 0 {
        return None;
    }
    let size = u64::from(query.size().get());
    let page = u64::from(query.page());
    let from = (page - 1).saturating_mul(size).saturating_add(1);
    let to = page.saturating_mul(size).min(total);
    Some(ItemRange { from, to, total })
}
