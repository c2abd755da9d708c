//! Item domain types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DbId;

/// An item listed for sharing.
///
/// Owned exclusively by one user; only the owner may mutate it. The
/// booking engine reads a single field from it: the availability flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: DbId,
    pub name: String,
    pub description: String,
    /// Whether the item can currently be booked. Also controls presence
    /// in the availability index.
    pub available: bool,
    pub owner_id: DbId,
}

/// Data for an item about to be created.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewItem {
    #[validate(length(min = 1, message = "name must not be blank"))]
    pub name: String,
    #[validate(length(min = 1, message = "description must not be blank"))]
    pub description: String,
    pub available: bool,
}

/// Partial update for an item. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl ItemPatch {
    /// Apply the patch over an existing item, field by field.
    pub fn apply(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(available) = self.available {
            item.available = available;
        }
    }
}
