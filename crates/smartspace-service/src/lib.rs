//! # smartspace-service
//!
//! Business logic service layer for Smartspace. Services validate requests
//! against the user and element stores, enforce role and federation rules,
//! dispatch actions to plugins, and compose time-window queries.
//!
//! Services follow constructor injection: all stores are provided at
//! construction time as `Arc<dyn ...Store>` references.

pub mod action;
pub mod clock;
pub mod element;
pub mod user;

pub use action::{ActionError, ActionService};
pub use clock::MonotonicClock;
pub use element::ElementService;
pub use user::UserService;
