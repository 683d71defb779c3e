//! Request extractors and parsing helpers.

pub mod pagination;
pub mod validated;

pub use pagination::PaginationParams;
pub use validated::validated;
