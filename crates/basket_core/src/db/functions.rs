//! Application-defined SQL functions.
//!
//! SQLite's built-in `lower()` and `LIKE` fold ASCII only; user-facing text
//! here is Arabic and accented Latin, so matching goes through these.

use super::DbResult;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// SQL name of the Unicode lower-case function.
pub const UNICODE_LOWER_FN: &str = "unicode_lower";

/// Registers every application SQL function on `conn`.
pub fn register_functions(conn: &Connection) -> DbResult<()> {
    conn.create_scalar_function(
        UNICODE_LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|text| text.to_lowercase()))
        },
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::register_functions;
    use rusqlite::Connection;

    #[test]
    fn unicode_lower_folds_beyond_ascii_and_keeps_null() {
        let conn = Connection::open_in_memory().unwrap();
        register_functions(&conn).unwrap();

        let folded: String = conn
            .query_row("SELECT unicode_lower('ÉLODIE Мария');", [], |row| row.get(0))
            .unwrap();
        assert_eq!(folded, "élodie мария");

        let null: Option<String> = conn
            .query_row("SELECT unicode_lower(NULL);", [], |row| row.get(0))
            .unwrap();
        assert_eq!(null, None);
    }
}
