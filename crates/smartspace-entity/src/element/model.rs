//! Element entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use smartspace_core::types::key::ElementKey;

/// A point on the smartspace map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, FromRow)]
pub struct Location {
    /// Horizontal coordinate.
    #[sqlx(rename = "location_x")]
    pub x: f64,
    /// Vertical coordinate.
    #[sqlx(rename = "location_y")]
    pub y: f64,
}

/// A physical or virtual element users act upon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ElementEntity {
    /// Identifier, unique within the element's smartspace.
    pub element_id: String,
    /// Smartspace that owns the element.
    pub element_smartspace: String,
    /// Display name.
    pub name: String,
    /// Free-text category.
    #[serde(rename = "type")]
    #[sqlx(rename = "element_type")]
    pub element_type: String,
    /// Where the element is.
    #[sqlx(flatten)]
    #[serde(default)]
    pub location: Location,
    /// Email of the creating user.
    pub creator_email: String,
    /// Smartspace of the creating user.
    pub creator_smartspace: String,
    /// Whether the element is no longer in use.
    #[serde(default)]
    pub expired: bool,
    /// Element-specific payload.
    #[sqlx(json)]
    #[serde(default)]
    pub more_attributes: Map<String, Value>,
    /// When the element was created.
    pub creation_timestamp: DateTime<Utc>,
}

impl ElementEntity {
    /// Create an element at the origin with no attributes.
    pub fn new(
        smartspace: impl Into<String>,
        name: impl Into<String>,
        element_type: impl Into<String>,
        creator_email: impl Into<String>,
        creator_smartspace: impl Into<String>,
    ) -> Self {
        Self {
            element_id: String::new(),
            element_smartspace: smartspace.into(),
            name: name.into(),
            element_type: element_type.into(),
            location: Location::default(),
            creator_email: creator_email.into(),
            creator_smartspace: creator_smartspace.into(),
            expired: false,
            more_attributes: Map::new(),
            creation_timestamp: Utc::now(),
        }
    }

    /// Set the element id.
    pub fn with_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = element_id.into();
        self
    }

    /// The composite key `elementId#elementSmartspace`.
    pub fn key(&self) -> ElementKey {
        ElementKey::new(&self.element_id, &self.element_smartspace)
    }
}
