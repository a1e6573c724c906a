//! Contact relation repository.
//!
//! # Invariants
//! - Relations are directed: `owner -> contact`.
//! - A user never appears in their own contact list (enforced by a table
//!   CHECK constraint and by the service layer).

use crate::model::user::{Contact, UserId};
use crate::repo::user_repo::RawUser;
use crate::repo::{parse_user_id, RepoResult};
use rusqlite::{params, Connection};
use std::collections::HashSet;

/// Contact list management.
pub trait ContactRepository {
    /// Lists the owner's contacts, oldest relation first.
    fn list_contacts(&self, owner: UserId) -> RepoResult<Vec<Contact>>;
    /// Ids of everyone in the owner's contact list.
    fn contact_ids(&self, owner: UserId) -> RepoResult<HashSet<UserId>>;
    /// Returns `false` when the relation already existed.
    fn add_contact(&self, owner: UserId, contact: UserId) -> RepoResult<bool>;
    /// Returns `false` when there was nothing to remove.
    fn remove_contact(&self, owner: UserId, contact: UserId) -> RepoResult<bool>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn list_contacts(&self, owner: UserId) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                u.id,
                u.name,
                u.username,
                u.display_name,
                u.avatar_url,
                u.email,
                c.created_at AS added_at
             FROM contacts c
             INNER JOIN users u ON u.id = c.contact_id
             WHERE c.owner_id = ?1
             ORDER BY c.created_at ASC, u.id ASC;",
        )?;
        let mut rows = stmt.query([owner.to_string()])?;

        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            let added_at: i64 = row.get("added_at")?;
            contacts.push(Contact {
                profile: RawUser::from_row(row)?.into_profile()?,
                added_at,
            });
        }
        Ok(contacts)
    }

    fn contact_ids(&self, owner: UserId) -> RepoResult<HashSet<UserId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT contact_id FROM contacts WHERE owner_id = ?1;")?;
        let mut rows = stmt.query([owner.to_string()])?;

        let mut ids = HashSet::new();
        while let Some(row) = rows.next()? {
            let value: String = row.get(0)?;
            ids.insert(parse_user_id(&value, "contacts.contact_id")?);
        }
        Ok(ids)
    }

    fn add_contact(&self, owner: UserId, contact: UserId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO contacts (owner_id, contact_id, created_at)
             VALUES (?1, ?2, ?3);",
            params![
                owner.to_string(),
                contact.to_string(),
                crate::now_epoch_ms()
            ],
        )?;
        Ok(changed == 1)
    }

    fn remove_contact(&self, owner: UserId, contact: UserId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM contacts WHERE owner_id = ?1 AND contact_id = ?2;",
            params![owner.to_string(), contact.to_string()],
        )?;
        Ok(changed == 1)
    }
}
