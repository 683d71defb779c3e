//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use smartspace_core::types::pagination::{DEFAULT_PAGE_SIZE, PageRequest};

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (0-based, default: 0).
    #[serde(default)]
    pub page: u32,
    /// Items per page (default: 10).
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Converts to a `PageRequest`, capping the size at `max_size`.
    pub fn into_page_request(self, max_size: u32) -> PageRequest {
        PageRequest::new(self.page, self.size.min(max_size.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_is_capped() {
        let params = PaginationParams { page: 3, size: 5000 };
        assert_eq!(params.into_page_request(1000), PageRequest::new(3, 1000));
    }

    #[test]
    fn test_zero_size_becomes_one() {
        let params = PaginationParams { page: 0, size: 0 };
        assert_eq!(params.into_page_request(1000).size, 1);
    }
}
