//! Attendance plugins for Smartspace.
//!
//! A `CheckIn` action opens a session for a player and a `CheckOut` action
//! closes it. The service's check-in/check-out window query reads the
//! sessions these plugins record.

pub mod checkin;
pub mod checkout;
pub mod session;

use std::sync::Arc;

use smartspace_database::store::ActionStore;
use smartspace_plugin::ActionPlugin;

pub use checkin::CheckInPlugin;
pub use checkout::CheckOutPlugin;

/// Both attendance plugins over one action store.
pub fn attendance_plugins(actions: Arc<dyn ActionStore>) -> Vec<Arc<dyn ActionPlugin>> {
    vec![
        Arc::new(CheckInPlugin::new(Arc::clone(&actions))),
        Arc::new(CheckOutPlugin::new(actions)),
    ]
}
