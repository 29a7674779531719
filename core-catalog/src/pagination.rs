//! Pagination helper types for repository queries

use serde::{Deserialize, Serialize};

/// Number of items per page used across all listing endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Pagination request parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Requested page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub per_page: u32,
}

impl PageQuery {
    /// Create a new page query. Page numbers start at 1; a page of 0 is
    /// treated as the first page.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_catalog::pagination::PageQuery;
    ///
    /// let query = PageQuery::new(3);
    /// assert_eq!(query.page, 3);
    /// assert_eq!(query.per_page, 10);
    ///
    /// let query = PageQuery::new(0);
    /// assert_eq!(query.page, 1);
    /// ```
    pub fn new(page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: DEFAULT_PAGE_SIZE,
        }
    }

    /// Calculate the SQL OFFSET value
    pub fn offset(&self) -> u32 {
        (self.page - 1) * self.per_page
    }

    /// Get the LIMIT value (same as per_page)
    pub fn limit(&self) -> u32 {
        self.per_page
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Paginated response containing items and metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in the current page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: u64,
    /// Current page number (1-indexed)
    pub current_page: u32,
    /// Number of the last page
    pub last_page: u32,
    /// Number of items per page
    pub per_page: u32,
}

impl<T> Page<T> {
    /// Create a new paginated response
    ///
    /// # Examples
    ///
    /// ```
    /// use core_catalog::pagination::{Page, PageQuery};
    ///
    /// let items = vec![1, 2, 3];
    /// let query = PageQuery::new(3);
    /// let page = Page::new(items, 23, query);
    ///
    /// assert_eq!(page.items.len(), 3);
    /// assert_eq!(page.total, 23);
    /// assert_eq!(page.current_page, 3);
    /// assert_eq!(page.last_page, 3);
    /// ```
    pub fn new(items: Vec<T>, total: u64, query: PageQuery) -> Self {
        let last_page = if query.per_page == 0 {
            0
        } else {
            ((total as f64) / (query.per_page as f64)).ceil() as u32
        };

        Self {
            items,
            total,
            current_page: query.page,
            last_page,
            per_page: query.per_page,
        }
    }

    /// Check if there are more pages after the current one
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    /// Map the items to a different type
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            current_page: self.current_page,
            last_page: self.last_page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_default() {
        let query = PageQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 10);
    }

    #[test]
    fn test_page_query_zero_clamps_to_first_page() {
        let query = PageQuery::new(0);
        assert_eq!(query.page, 1);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_page_query_offset() {
        let query = PageQuery::new(1);
        assert_eq!(query.offset(), 0);

        let query = PageQuery::new(3);
        assert_eq!(query.offset(), 20);
    }

    #[test]
    fn test_page_query_limit() {
        let query = PageQuery::new(1);
        assert_eq!(query.limit(), 10);
    }

    #[test]
    fn test_page_new() {
        let items = vec![1, 2, 3];
        let query = PageQuery::new(3);
        let page = Page::new(items, 23, query);

        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 23);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.last_page, 3);
        assert_eq!(page.per_page, 10);
    }

    #[test]
    fn test_page_remainder_rounds_up() {
        let page = Page::new(vec![1], 11, PageQuery::new(2));
        assert_eq!(page.last_page, 2);

        let page = Page::new(Vec::<i32>::new(), 20, PageQuery::new(2));
        assert_eq!(page.last_page, 2);
    }

    #[test]
    fn test_page_has_next() {
        let page = Page::new(vec![1, 2, 3], 25, PageQuery::new(1));
        assert!(page.has_next());

        let page = Page::new(vec![1, 2, 3], 25, PageQuery::new(3));
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], 25, PageQuery::new(1));
        let mapped = page.map(|x| x * 2);

        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.total, 25);
        assert_eq!(mapped.current_page, 1);
    }

    #[test]
    fn test_page_past_end_is_empty_with_total() {
        let page = Page::new(Vec::<i32>::new(), 5, PageQuery::new(4));
        assert_eq!(page.items.len(), 0);
        assert_eq!(page.total, 5);
        assert_eq!(page.last_page, 1);
    }
}
