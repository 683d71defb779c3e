//! Pagination for list queries.
//!
//! Pages are zero-based, matching the `page`/`size` query parameters of the
//! smartspace REST API.

use serde::{Deserialize, Serialize};

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (0-based).
    #[serde(default)]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub size: u32,
}

impl PageRequest {
    /// Create a new page request. A size of zero is raised to one.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    /// A single page large enough to hold every row.
    pub fn unpaged() -> Self {
        Self {
            page: 0,
            size: u32::MAX,
        }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }

    /// Apply this page to an already ordered iterator.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit()).unwrap_or(usize::MAX);
        items.into_iter().skip(offset).take(limit).collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_zero_based() {
        assert_eq!(PageRequest::new(0, 5).offset(), 0);
        assert_eq!(PageRequest::new(3, 5).offset(), 15);
    }

    #[test]
    fn test_zero_size_is_raised() {
        assert_eq!(PageRequest::new(0, 0).size, 1);
    }

    #[test]
    fn test_slice() {
        let page = PageRequest::new(1, 2);
        assert_eq!(page.slice(1..=5), vec![3, 4]);
        assert!(PageRequest::new(9, 2).slice(1..=5).is_empty());
    }

    #[test]
    fn test_unpaged_does_not_overflow() {
        let page = PageRequest::unpaged();
        assert_eq!(page.offset(), 0);
        assert_eq!(page.slice(0..3).len(), 3);
    }
}
