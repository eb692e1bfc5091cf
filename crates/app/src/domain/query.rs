//! Query Engine
//!
//! List requests are compiled into a store-neutral [`Query`]: a conjunction of
//! filters, a total sort order and a result window. Stores either translate the
//! query into their own language or evaluate it in process with [`Query::apply`].

use std::cmp::Ordering;

use crate::domain::validation::ValidationErrors;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Larger page sizes are clamped to this value.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Paging, search and sort parameters shared by every list operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    pub page_number: u32,
    pub page_size: u32,
    pub search_term: Option<String>,
    pub sort_by: Option<String>,
    pub sort_descending: bool,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search_term: None,
            sort_by: None,
            sort_descending: false,
        }
    }
}

impl QueryParameters {
    /// Resolve the requested page, clamping the page size.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the page number or page size is zero.
    pub fn page(&self) -> Result<PageRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.page_number < 1 {
            errors.add("pageNumber", "Page number must be at least 1");
        }

        if self.page_size < 1 {
            errors.add("pageSize", "Page size must be at least 1");
        }

        errors.into_result()?;

        Ok(PageRequest {
            number: self.page_number,
            size: self.page_size.min(MAX_PAGE_SIZE),
        })
    }

    /// Lower-cased search term, or `None` when absent or blank.
    #[must_use]
    pub fn search(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        if self.sort_descending {
            Direction::Descending
        } else {
            Direction::Ascending
        }
    }
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u32,
    pub size: u32,
}

impl PageRequest {
    #[must_use]
    pub fn window(self) -> Window {
        Window::Page {
            offset: u64::from(self.number - 1) * u64::from(self.size),
            limit: u64::from(self.size),
        }
    }
}

/// Which slice of the sorted, filtered set to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Page { offset: u64, limit: u64 },
    All,
}

impl Window {
    /// Select the window's records from an already sorted sequence.
    fn select<R>(self, records: Vec<R>) -> Vec<R> {
        match self {
            Self::All => records,
            Self::Page { offset, limit } => records
                .into_iter()
                .skip(usize::try_from(offset).unwrap_or(usize::MAX))
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// One component of a sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder<K> {
    pub key: K,
    pub direction: Direction,
}

impl<K> SortOrder<K> {
    pub const fn new(key: K, direction: Direction) -> Self {
        Self { key, direction }
    }

    pub const fn ascending(key: K) -> Self {
        Self::new(key, Direction::Ascending)
    }
}

/// In-process evaluation of a filter against a record.
pub trait Filter<R> {
    fn matches(&self, record: &R) -> bool;
}

/// In-process comparison of two records by a sort key.
pub trait SortKey<R> {
    fn compare(&self, a: &R, b: &R) -> Ordering;
}

/// A compiled list query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query<F, K> {
    /// Every filter must match.
    pub filters: Vec<F>,

    /// Sort order, most significant key first. Always ends with an id tie-break.
    pub order: Vec<SortOrder<K>>,

    pub window: Window,
}

impl<F, K> Query<F, K> {
    /// Evaluate the query over `records`, returning the window and the filtered total.
    pub fn apply<R>(&self, records: impl IntoIterator<Item = R>) -> Slice<R>
    where
        F: Filter<R>,
        K: SortKey<R>,
    {
        let mut matching: Vec<R> = records
            .into_iter()
            .filter(|record| self.filters.iter().all(|filter| filter.matches(record)))
            .collect();

        matching.sort_by(|a, b| self.compare(a, b));

        let total = matching.len() as u64;

        Slice {
            records: self.window.select(matching),
            total,
        }
    }

    fn compare<R>(&self, a: &R, b: &R) -> Ordering
    where
        K: SortKey<R>,
    {
        self.order.iter().fold(Ordering::Equal, |ordering, sort| {
            ordering.then_with(|| sort.direction.apply(sort.key.compare(a, b)))
        })
    }
}

/// The records inside a query window together with the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice<R> {
    pub records: Vec<R>,
    pub total: u64,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedResult<T> {
    pub data: Vec<T>,
    pub total_count: u64,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl<T> PagedResult<T> {
    #[must_use]
    pub fn new(slice: Slice<T>, page: PageRequest) -> Self {
        Self {
            total_pages: slice.total.div_ceil(u64::from(page.size)),
            data: slice.records,
            total_count: slice.total,
            page_number: page.number,
            page_size: page.size,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            data: self.data.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_number: self.page_number,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

/// Case-insensitive substring match against an already lower-cased needle.
pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Case-insensitive text ordering. Values that differ only by case fall back to
/// their exact bytes so the order stays total.
pub(crate) fn cmp_folded(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
