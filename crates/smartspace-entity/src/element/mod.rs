//! Element domain entities.

pub mod model;

pub use model::{ElementEntity, Location};
