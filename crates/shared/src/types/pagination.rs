//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// Calculates the offset for database queries.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(u64::from(request.per_page.max(1)))
        };

        Self {
            data,
            meta: PageMeta {
                page: request.page,
                per_page: request.per_page,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 20, 0)]
    #[case(2, 20, 20)]
    #[case(3, 50, 100)]
    #[case(0, 20, 0)]
    fn test_offset(#[case] page: u32, #[case] per_page: u32, #[case] expected: u64) {
        let request = PageRequest { page, per_page };
        assert_eq!(request.offset(), expected);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(20, 1)]
    #[case(21, 2)]
    #[case(100, 5)]
    fn test_total_pages(#[case] total: u64, #[case] expected: u64) {
        let page = Page::<u32>::new(vec![], PageRequest::default(), total);
        assert_eq!(page.meta.total_pages, expected);
    }
}
