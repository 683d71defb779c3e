//! Core type definitions used across the Smartspace workspace.

pub mod key;
pub mod pagination;
pub mod sorting;

pub use key::{CompositeKey, KEY_SEPARATOR};
pub use pagination::PageRequest;
pub use sorting::{SortDirection, SortField};
