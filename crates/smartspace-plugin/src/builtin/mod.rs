//! Plugins shipped with the service itself.

pub mod echo;

pub use echo::EchoPlugin;
