//! # smartspace-entity
//!
//! Domain entity models for Smartspace. Every struct in this crate
//! represents a database table row. All entities derive `Debug`, `Clone`,
//! `Serialize`, `Deserialize`, and `sqlx::FromRow`.

pub mod action;
pub mod element;
pub mod user;

pub use action::ActionEntity;
pub use element::ElementEntity;
pub use user::{UserEntity, UserRole};
