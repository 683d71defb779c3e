//! Core traits defined in `smartspace-core` and implemented by other crates.

pub mod repository;

pub use repository::Repository;
