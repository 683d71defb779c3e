//! User domain entities.

pub mod model;
pub mod role;

pub use model::UserEntity;
pub use role::UserRole;
