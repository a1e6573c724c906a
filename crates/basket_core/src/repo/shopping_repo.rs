//! Shopping item repository.

use crate::category::Category;
use crate::model::shopping::{NewShoppingItem, ShoppingItem, ShoppingItemId};
use crate::model::user::UserId;
use crate::repo::{bool_to_int, int_to_bool, parse_user_id, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const ITEM_SELECT_SQL: &str = "SELECT
    id,
    owner_id,
    name,
    quantity,
    category_id,
    completed,
    created_at
FROM shopping_items";

/// Shopping list storage contract.
pub trait ShoppingRepository {
    fn add_item(&self, item: &NewShoppingItem) -> RepoResult<ShoppingItem>;
    fn get_item(&self, id: ShoppingItemId) -> RepoResult<Option<ShoppingItem>>;
    /// Owner's items, newest first.
    fn list_items(&self, owner: UserId) -> RepoResult<Vec<ShoppingItem>>;
    /// Updates an item of `owner`; other owners' items count as missing.
    fn set_completed(&self, owner: UserId, id: ShoppingItemId, completed: bool) -> RepoResult<()>;
    /// Deletes an item of `owner`; other owners' items count as missing.
    fn delete_item(&self, owner: UserId, id: ShoppingItemId) -> RepoResult<()>;
}

/// SQLite-backed shopping repository.
pub struct SqliteShoppingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteShoppingRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ShoppingRepository for SqliteShoppingRepository<'_> {
    fn add_item(&self, item: &NewShoppingItem) -> RepoResult<ShoppingItem> {
        self.conn.execute(
            "INSERT INTO shopping_items (owner_id, name, quantity, category_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                item.owner_id.to_string(),
                item.name.as_str(),
                item.quantity,
                item.category_id,
                crate::now_epoch_ms(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get_item(id)?
            .ok_or_else(|| RepoError::not_found("shopping item", id))
    }

    fn get_item(&self, id: ShoppingItemId) -> RepoResult<Option<ShoppingItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }
        Ok(None)
    }

    fn list_items(&self, owner: UserId) -> RepoResult<Vec<ShoppingItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL}
             WHERE owner_id = ?1
             ORDER BY created_at DESC, id DESC;"
        ))?;
        let mut rows = stmt.query([owner.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }

    fn set_completed(&self, owner: UserId, id: ShoppingItemId, completed: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE shopping_items SET completed = ?3 WHERE id = ?1 AND owner_id = ?2;",
            params![id, owner.to_string(), bool_to_int(completed)],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("shopping item", id));
        }
        Ok(())
    }

    fn delete_item(&self, owner: UserId, id: ShoppingItemId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM shopping_items WHERE id = ?1 AND owner_id = ?2;",
            params![id, owner.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("shopping item", id));
        }
        Ok(())
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<ShoppingItem> {
    let owner_text: String = row.get("owner_id")?;
    let category_id: u8 = row.get("category_id")?;
    if Category::try_from_id(category_id).is_none() {
        return Err(RepoError::InvalidData(format!(
            "invalid category id `{category_id}` in shopping_items.category_id"
        )));
    }

    Ok(ShoppingItem {
        id: row.get("id")?,
        owner_id: parse_user_id(&owner_text, "shopping_items.owner_id")?,
        name: row.get("name")?,
        quantity: row.get("quantity")?,
        category_id,
        completed: int_to_bool(row.get("completed")?, "shopping_items.completed")?,
        created_at: row.get("created_at")?,
    })
}
