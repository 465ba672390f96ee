//! Pagination and sorting DTOs.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i32 = 0;
pub const DEFAULT_PER_PAGE: i32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchOrder {
    #[default]
    Undefined,
    Asc,
    Desc,
}

/// Paginated search request.
///
/// Values arrive straight from callers and may be out of range; call
/// [`normalize`](Self::normalize) before using them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchInput {
    /// 0-based page index.
    pub page: i32,
    pub per_page: i32,
    /// Free-text filter; interpretation is up to the repository.
    pub search: String,
    pub order_by: String,
    pub order: SearchOrder,
}

impl SearchInput {
    pub fn new(
        page: i32,
        per_page: i32,
        search: impl Into<String>,
        order_by: impl Into<String>,
        order: SearchOrder,
    ) -> Self {
        Self {
            page,
            per_page,
            search: search.into(),
            order_by: order_by.into(),
            order,
        }
    }

    /// Clamp paging values and resolve an undefined order to ascending.
    ///
    /// Idempotent. `search` and `order_by` are left untouched.
    pub fn normalize(&mut self) -> &mut Self {
        if self.page < 0 {
            self.page = DEFAULT_PAGE;
        }
        if self.per_page <= 0 {
            self.per_page = DEFAULT_PER_PAGE;
        }
        if self.order == SearchOrder::Undefined {
            self.order = SearchOrder::Asc;
        }
        self
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Number of items preceding the requested page.
    ///
    /// Only meaningful after normalization; negative values clamp to zero.
    pub fn offset(&self) -> usize {
        let page = usize::try_from(self.page).unwrap_or_default();
        let per_page = usize::try_from(self.per_page).unwrap_or_default();
        page.saturating_mul(per_page)
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutput<T> {
    pub page: i32,
    pub per_page: i32,
    /// Matches across all pages.
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> SearchOutput<T> {
    pub fn new(page: i32, per_page: i32, total: u64, items: Vec<T>) -> Self {
        Self {
            page,
            per_page,
            total,
            items,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SearchOutput<U> {
        SearchOutput {
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
