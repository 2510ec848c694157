//! Search, sort and pagination over generic records.
//!
//! Records are `serde_json::Value`s so any serializable row type can be
//! shown in a table. [`Table`] runs the full pipeline: search, then sort,
//! then paginate.

pub mod pagination;
pub mod search;
pub mod sorting;

pub use pagination::{PageItem, Pagination, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
pub use sorting::{sort_records, SortDirection, SortState};

use crate::error::Result;
use serde::Serialize;
use serde_json::Value;

/// Converts typed rows into table records
pub fn to_records<T: Serialize>(items: &[T]) -> Result<Vec<Value>> {
    items
        .iter()
        .map(|item| serde_json::to_value(item).map_err(Into::into))
        .collect()
}

/// Table state: rows plus the user's query, sort and page selection
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Value>,
    query: String,
    sort: SortState,
    pagination: Pagination,
}

/// What a table shows for its current state
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    pub records: Vec<&'a Value>,
    /// Rows left after searching
    pub matched: usize,
    pub pages: usize,
    pub page_menu: Vec<PageItem>,
    pub range_label: String,
    pub show_pagination: bool,
}

impl Table {
    pub fn new(rows: Vec<Value>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn from_items<T: Serialize>(items: &[T]) -> Result<Self> {
        Ok(Self::new(to_records(items)?))
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.pagination.set_page_size(page_size);
        self
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn pagination_mut(&mut self) -> &mut Pagination {
        &mut self.pagination
    }

    /// A new query always starts at page 1
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.pagination.set_page(1);
    }

    pub fn click_header(&mut self, column: &str) {
        self.sort.click(column);
    }

    pub fn view(&self) -> TableView<'_> {
        let mut matched = search::search(&self.rows, &self.query);
        sort_records(&mut matched, &self.sort);

        let total = matched.len();
        TableView {
            records: self.pagination.records(&matched).to_vec(),
            matched: total,
            pages: self.pagination.page_count(total),
            page_menu: self.pagination.page_menu(total),
            range_label: self.pagination.range_label(total),
            show_pagination: self.pagination.is_visible(total, &self.query),
        }
    }
}
