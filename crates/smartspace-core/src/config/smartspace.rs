//! Local smartspace identity.

use serde::{Deserialize, Serialize};

/// Identity of the smartspace this instance serves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartspaceConfig {
    /// Name of the local smartspace. Actions whose player belongs to this
    /// smartspace are authored locally; everything else is imported.
    pub name: String,
}

impl SmartspaceConfig {
    /// Whether `smartspace` names the local instance.
    pub fn is_local(&self, smartspace: &str) -> bool {
        self.name == smartspace
    }
}
