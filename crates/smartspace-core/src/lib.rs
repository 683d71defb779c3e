//! # smartspace-core
//!
//! Core crate for Smartspace. Contains the generic repository trait,
//! configuration schemas, composite keys, pagination/sorting types,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Smartspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
