//! # smartspace-api
//!
//! HTTP API for Smartspace built on Axum. Exposes every action service
//! operation plus user and element registration, plugin listing, and a
//! health check. All routes share one [`AppState`].

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_state, run_server};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
