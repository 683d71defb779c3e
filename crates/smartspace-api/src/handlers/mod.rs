//! Route handlers organized by domain.

pub mod action;
pub mod admin;
pub mod element;
pub mod health;
pub mod manager;
pub mod plugin;
pub mod user;
