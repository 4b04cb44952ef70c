// Pagination math for search results.
// Caps the navigable total at the upstream search depth limit and windows page links.

/// GitHub search only serves the first 1000 results of any query.
pub const MAX_SEARCH_RESULTS: u64 = 1000;

/// Pages shown on either side of the current page.
const WINDOW_RADIUS: u32 = 2;

/// One entry in the page control strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: u32, current: bool },
    Gap,
}

/// Page navigation state for one rendered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    total: u64,
    current: u32,
    page_count: u32,
}

impl Pagination {
    pub fn new(total_count: u64, current: u32, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        let total = total_count.min(MAX_SEARCH_RESULTS);
        let page_count = total.div_ceil(u64::from(per_page)) as u32;

        Self {
            total,
            current,
            page_count,
        }
    }

    /// Number of results reachable through page navigation.
    pub fn navigable_total(&self) -> u64 {
        self.total
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Target of the "previous" control. Not clamped to the page range.
    pub fn prev_page(&self) -> u32 {
        self.current.saturating_sub(1)
    }

    /// Target of the "next" control. Not clamped to the page range.
    pub fn next_page(&self) -> u32 {
        self.current.saturating_add(1)
    }

    pub fn contains(&self, page: u32) -> bool {
        (1..=self.page_count).contains(&page)
    }

    pub fn has_prev(&self) -> bool {
        self.contains(self.prev_page())
    }

    pub fn has_next(&self) -> bool {
        self.contains(self.next_page())
    }

    /// Whether the requested page lies beyond the navigable results.
    pub fn is_out_of_range(&self) -> bool {
        !self.contains(self.current)
    }

    /// Page strip: first and last page, the current page with its
    /// neighbours, and gaps between non-adjacent runs.
    pub fn items(&self) -> Vec<PageItem> {
        if self.page_count == 0 {
            return Vec::new();
        }

        let low = self
            .current
            .saturating_sub(WINDOW_RADIUS)
            .clamp(1, self.page_count);
        let high = self
            .current
            .saturating_add(WINDOW_RADIUS)
            .clamp(1, self.page_count);

        let mut numbers = vec![1];
        numbers.extend(low..=high);
        numbers.push(self.page_count);
        numbers.sort_unstable();
        numbers.dedup();

        let mut items = Vec::with_capacity(numbers.len() * 2);
        let mut previous: Option<u32> = None;
        for number in numbers {
            if previous.is_some_and(|p| number > p + 1) {
                items.push(PageItem::Gap);
            }
            items.push(PageItem::Page {
                number,
                current: number == self.current,
            });
            previous = Some(number);
        }
        items
    }
}
