//! # Keyring
//!
//! Locally held key material by alias, and the rule that picks the main key.
//!
//! ## Main-Key Rule
//!
//! - While no alias has ever been put with `is_main = true`, the most
//!   recently put alias is the (implicit) main key.
//! - Putting an alias with `is_main = true` makes it the explicit main key.
//! - Once an explicit main key exists, puts with `is_main = false` leave it
//!   in place, even a re-put of the main alias itself.

use serde::{Deserialize, Serialize};

/// A stored key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    /// Unique, non-empty alias
    pub alias: String,
    /// Private key material (Ed25519 seed)
    pub key_material: Vec<u8>,
    /// Flag supplied on the last put
    pub is_main: bool,
}

impl std::fmt::Debug for KeyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyEntry")
            .field("alias", &self.alias)
            .field("key_material", &"<redacted>")
            .field("is_main", &self.is_main)
            .finish()
    }
}

/// Which alias is the main key, and whether it was chosen explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainKeySelection {
    /// Current main alias; `None` only for an empty keyring
    pub alias: Option<String>,
    /// Whether any alias has been put with `is_main = true`
    pub explicit: bool,
}

impl MainKeySelection {
    /// Selection after putting `alias` with the given flag.
    pub fn after_put(&self, alias: &str, is_main: bool) -> Self {
        if is_main {
            Self {
                alias: Some(alias.to_string()),
                explicit: true,
            }
        } else if !self.explicit {
            Self {
                alias: Some(alias.to_string()),
                explicit: false,
            }
        } else {
            self.clone()
        }
    }
}
