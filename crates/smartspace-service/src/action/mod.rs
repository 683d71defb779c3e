//! Action service: creation, import, plugin invocation, and queries.

pub mod error;
pub mod service;
pub mod validation;

pub use error::ActionError;
pub use service::{ActionService, EMPTY_BOUNDARY};
