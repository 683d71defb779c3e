//! Composite keys of the form `id#smartspace`.
//!
//! Users, elements, and actions are each identified by a local identifier
//! plus the name of the smartspace that owns them. Distinct newtypes keep a
//! `UserKey` from being passed where an `ElementKey` is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Separator between the local identifier and the smartspace name.
pub const KEY_SEPARATOR: char = '#';

/// Behaviour shared by every composite key type.
pub trait CompositeKey: fmt::Display + FromStr<Err = AppError> {
    /// The local identifier part.
    fn id(&self) -> &str;

    /// The owning smartspace.
    fn smartspace(&self) -> &str;
}

/// Macro to define a composite key newtype.
macro_rules! define_key {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name {
            id: String,
            smartspace: String,
        }

        impl $name {
            /// Create a key from its two parts.
            pub fn new(id: impl Into<String>, smartspace: impl Into<String>) -> Self {
                Self {
                    id: id.into(),
                    smartspace: smartspace.into(),
                }
            }
        }

        impl CompositeKey for $name {
            fn id(&self) -> &str {
                &self.id
            }

            fn smartspace(&self) -> &str {
                &self.smartspace
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}{}", self.id, KEY_SEPARATOR, self.smartspace)
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.rsplit_once(KEY_SEPARATOR) {
                    Some((id, smartspace)) if !id.is_empty() && !smartspace.is_empty() => {
                        Ok(Self::new(id, smartspace))
                    }
                    _ => Err(AppError::validation(format!(
                        "Invalid {} key '{s}'. Expected '<id>#<smartspace>'",
                        $what
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = AppError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(key: $name) -> String {
                key.to_string()
            }
        }
    };
}

define_key!(
    /// Key of an action: `actionId#actionSmartspace`.
    ActionKey, "action"
);

define_key!(
    /// Key of a user: `email#smartspace`.
    UserKey, "user"
);

define_key!(
    /// Key of an element: `elementId#elementSmartspace`.
    ElementKey, "element"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let key = ActionKey::new("42", "local");
        assert_eq!(key.to_string(), "42#local");
    }

    #[test]
    fn test_parse() {
        let key: UserKey = "bob@x.com#2019B.space".parse().expect("should parse");
        assert_eq!(key.id(), "bob@x.com");
        assert_eq!(key.smartspace(), "2019B.space");
    }

    #[test]
    fn test_parse_splits_on_last_separator() {
        let key: ElementKey = "a#b#space".parse().expect("should parse");
        assert_eq!(key.id(), "a#b");
        assert_eq!(key.smartspace(), "space");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("no-separator".parse::<ActionKey>().is_err());
        assert!("#space".parse::<ActionKey>().is_err());
        assert!("42#".parse::<ActionKey>().is_err());
    }

    #[test]
    fn test_serde_uses_string_form() {
        let key = ElementKey::new("7", "remote");
        let json = serde_json::to_string(&key).expect("serialize");
        assert_eq!(json, "\"7#remote\"");
        let parsed: ElementKey = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, key);
    }
}
