//! Action domain entities.

pub mod model;

pub use model::{ActionEntity, CHECK_IN, CHECK_OUT};
