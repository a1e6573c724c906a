//! Ordered schema steps for the reference backend.
//!
//! # Invariants
//! - Step versions start at 1 and increase by one.
//! - Pending steps run inside a single transaction together with the
//!   `PRAGMA user_version` bump, so a failed step leaves the schema untouched.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `(version, name, sql)` in apply order.
const SCHEMA_STEPS: &[(u32, &str, &str)] = &[
    (1, "users_contacts", include_str!("0001_users_contacts.sql")),
    (2, "messages", include_str!("0002_messages.sql")),
    (3, "shopping_items", include_str!("0003_shopping_items.sql")),
];

/// Newest schema version this build can open.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |(version, _, _)| *version)
}

/// Schema version recorded in the database file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings the schema up to [`latest_version`].
///
/// # Errors
/// - [`DbError::UnsupportedSchemaVersion`] when the file was written by a
///   newer build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = schema_version(conn)?;
    let to = latest_version();
    if from > to {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: to,
        });
    }

    let pending: Vec<_> = SCHEMA_STEPS
        .iter()
        .filter(|(version, _, _)| *version > from)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, name, sql) in pending {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        info!("event=db_migrate_step module=db status=ok version={version} name={name}");
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from} to_version={to}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{latest_version, SCHEMA_STEPS};

    #[test]
    fn versions_are_contiguous_from_one() {
        for (index, (version, _, _)) in SCHEMA_STEPS.iter().enumerate() {
            assert_eq!(*version as usize, index + 1);
        }
        assert_eq!(latest_version() as usize, SCHEMA_STEPS.len());
    }
}
