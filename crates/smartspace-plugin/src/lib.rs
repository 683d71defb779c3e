//! # smartspace-plugin
//!
//! Action plugins for Smartspace. Provides:
//!
//! - The [`ActionPlugin`] trait, one implementation per action type
//! - A [`PluginRegistry`] resolving action types to plugins
//! - [`PluginManager`] for registering compiled-in plugins from configuration
//! - The built-in `Echo` plugin

pub mod builtin;
pub mod error;
pub mod manager;
pub mod registry;

pub use error::PluginError;
pub use manager::PluginManager;
pub use registry::{ActionPlugin, PluginInfo, PluginRegistry, capitalize};
