//! Shopping list use-cases.
//!
//! # Invariants
//! - Every added item is categorized from its normalized name.
//! - Grouped views keep storage order (newest first) within a category.
//! - Items are only changed or deleted on behalf of their owner.

use crate::category::categorize;
use crate::grouping::{group_by_category, into_labeled_groups, CategoryGroup};
use crate::model::shopping::{NewShoppingItem, ShoppingItem, ShoppingItemId};
use crate::model::user::UserId;
use crate::repo::shopping_repo::ShoppingRepository;
use crate::repo::RepoError;
use crate::service::collapse_whitespace;
use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShoppingError {
    #[error("item name cannot be empty")]
    BlankName,
    #[error("shopping item not found: {0}")]
    ItemNotFound(ShoppingItemId),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Shopping list facade over a repository implementation.
pub struct ShoppingService<S: ShoppingRepository> {
    repo: S,
}

impl<S: ShoppingRepository> ShoppingService<S> {
    pub fn new(repo: S) -> Self {
        Self { repo }
    }

    /// Adds one item, assigning its category from the name.
    pub fn add_item(
        &self,
        owner: UserId,
        name: &str,
        quantity: u32,
    ) -> Result<ShoppingItem, ShoppingError> {
        let name = collapse_whitespace(name);
        if name.is_empty() {
            return Err(ShoppingError::BlankName);
        }

        let category_id = categorize(&name);
        let item = self.repo.add_item(&NewShoppingItem {
            owner_id: owner,
            name,
            quantity: quantity.max(1),
            category_id,
        })?;
        info!(
            "event=shopping_add module=service status=ok item_id={} category_id={}",
            item.id, item.category_id
        );
        Ok(item)
    }

    /// Flips the completed flag of one of the owner's items and returns it.
    pub fn toggle_completed(
        &self,
        owner: UserId,
        id: ShoppingItemId,
    ) -> Result<ShoppingItem, ShoppingError> {
        let item = self.owned_item(owner, id)?;
        self.repo
            .set_completed(owner, id, !item.completed)
            .map_err(|err| not_found_as_item(err, id))?;
        self.owned_item(owner, id)
    }

    /// Deletes one of the owner's items.
    pub fn remove(&self, owner: UserId, id: ShoppingItemId) -> Result<(), ShoppingError> {
        self.repo
            .delete_item(owner, id)
            .map_err(|err| not_found_as_item(err, id))?;
        info!("event=shopping_remove module=service status=ok item_id={id}");
        Ok(())
    }

    /// Owner's items, newest first.
    pub fn list(&self, owner: UserId) -> Result<Vec<ShoppingItem>, ShoppingError> {
        Ok(self.repo.list_items(owner)?)
    }

    /// Owner's items grouped by category in ascending id order.
    pub fn grouped(&self, owner: UserId) -> Result<Vec<CategoryGroup<ShoppingItem>>, ShoppingError> {
        let items = self.repo.list_items(owner)?;
        Ok(into_labeled_groups(group_by_category(items)))
    }

    // Items of other owners are reported exactly like missing ones.
    fn owned_item(&self, owner: UserId, id: ShoppingItemId) -> Result<ShoppingItem, ShoppingError> {
        self.repo
            .get_item(id)?
            .filter(|item| item.owner_id == owner)
            .ok_or(ShoppingError::ItemNotFound(id))
    }
}

fn not_found_as_item(err: RepoError, id: ShoppingItemId) -> ShoppingError {
    match err {
        RepoError::NotFound { .. } => ShoppingError::ItemNotFound(id),
        other => ShoppingError::Repo(other),
    }
}
