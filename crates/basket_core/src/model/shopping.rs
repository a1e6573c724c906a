//! Shopping list item model.

use crate::category::CategoryId;
use crate::grouping::{Categorized, Named};
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// Backend-assigned shopping item id.
pub type ShoppingItemId = i64;

/// One entry on a user's shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: ShoppingItemId,
    pub owner_id: UserId,
    pub name: String,
    pub quantity: u32,
    /// Assigned by the categorizer at insert time.
    pub category_id: CategoryId,
    pub completed: bool,
    /// Epoch milliseconds.
    pub created_at: i64,
}

impl Categorized for ShoppingItem {
    fn category_id(&self) -> Option<CategoryId> {
        Some(self.category_id)
    }
}

impl Named for ShoppingItem {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Insert shape for a shopping item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShoppingItem {
    pub owner_id: UserId,
    pub name: String,
    pub quantity: u32,
    pub category_id: CategoryId,
}
