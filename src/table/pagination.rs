/// Page sizes offered by the "Show N entries" selector
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Below this many pages the menu lists every page number
const FULL_MENU_LIMIT: usize = 10;

/// One slot in the page-number menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// 1-based pagination over a list whose length is supplied per call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// A page size of zero is treated as one
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Changing the page size starts over at page 1
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    pub fn next_page(&mut self, total: usize) {
        if self.current_page < self.page_count(total) {
            self.current_page += 1;
        }
    }

    /// Index of the first record on the current page
    pub fn top_index(&self) -> usize {
        (self.current_page - 1) * self.page_size
    }

    /// One past the last record on a full current page
    pub fn bottom_index(&self) -> usize {
        self.current_page * self.page_size
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    pub fn page_numbers(&self, total: usize) -> Vec<usize> {
        (1..=self.page_count(total)).collect()
    }

    /// The slice of `rows` visible on the current page
    pub fn records<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = self.top_index().min(rows.len());
        let end = self.bottom_index().min(rows.len());
        &rows[start..end]
    }

    /// "Showing 11 to 20 of 42 entries"
    pub fn range_label(&self, total: usize) -> String {
        if total == 0 {
            return "Showing 0 to 0 of 0 entries".to_string();
        }
        format!(
            "Showing {} to {} of {} entries",
            self.top_index() + 1,
            self.bottom_index().min(total),
            total
        )
    }

    /// Controls are hidden for a single page and while a search is active
    pub fn is_visible(&self, total: usize, query: &str) -> bool {
        self.page_count(total) > 1 && query.is_empty()
    }

    /// Page-number menu.
    ///
    /// Short lists show every page. Long lists keep the first two pages,
    /// the last two, and the current page with its neighbours; the page
    /// numbered `pages / 2` is replaced by an ellipsis.
    pub fn page_menu(&self, total: usize) -> Vec<PageItem> {
        let pages = self.page_count(total);
        if pages < FULL_MENU_LIMIT {
            return (1..=pages).map(PageItem::Page).collect();
        }

        let middle = pages / 2;
        let current = self.current_page;
        (1..=pages)
            .filter_map(|page| {
                let index = page - 1;
                if page == middle {
                    Some(PageItem::Ellipsis)
                } else if index < 2
                    || index + 3 > pages
                    || page + 1 == current
                    || page == current
                    || page == current + 1
                {
                    Some(PageItem::Page(page))
                } else {
                    None
                }
            })
            .collect()
    }
}
