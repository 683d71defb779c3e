//! # smartspace-database
//!
//! Store traits for users, elements, and actions, plus two
//! implementations: PostgreSQL repositories (sqlx) and process-local
//! in-memory stores. [`Stores::from_config`] picks one from configuration.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use provider::Stores;
pub use store::{ActionStore, ElementStore, UserStore};
