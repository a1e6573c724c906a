//! User profile repository.

use crate::db::functions::UNICODE_LOWER_FN;
use crate::model::user::{UserId, UserProfile};
use crate::repo::{parse_user_id, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT
    id,
    name,
    username,
    display_name,
    avatar_url,
    email
FROM users";

/// Profile storage and lookup.
pub trait UserRepository {
    fn create_user(&self, profile: &UserProfile) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<UserProfile>>;
    /// Finds users whose name, username or display name contains `term`.
    ///
    /// Matching is a literal substring test after Unicode lower-casing of
    /// both sides; `limit` applies after matching.
    fn search_users(
        &self,
        term: &str,
        exclude: Option<UserId>,
        limit: u32,
    ) -> RepoResult<Vec<UserProfile>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, profile: &UserProfile) -> RepoResult<UserId> {
        self.conn.execute(
            "INSERT INTO users (id, name, username, display_name, avatar_url, email)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                profile.id.to_string(),
                profile.name.as_deref(),
                profile.username.as_deref(),
                profile.display_name.as_deref(),
                profile.avatar_url.as_deref(),
                profile.email.as_deref(),
            ],
        )?;
        Ok(profile.id)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<UserProfile>> {
        let raw = self
            .conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE id = ?1;"),
                [id.to_string()],
                RawUser::from_row,
            )
            .optional()?;
        raw.map(RawUser::into_profile).transpose()
    }

    fn search_users(
        &self,
        term: &str,
        exclude: Option<UserId>,
        limit: u32,
    ) -> RepoResult<Vec<UserProfile>> {
        let needle = term.to_lowercase();
        let mut stmt = self.conn.prepare(&format!(
            "{USER_SELECT_SQL}
             WHERE (?2 IS NULL OR id <> ?2)
               AND (
                    instr({UNICODE_LOWER_FN}(display_name), ?1) > 0
                 OR instr({UNICODE_LOWER_FN}(name), ?1) > 0
                 OR instr({UNICODE_LOWER_FN}(username), ?1) > 0
               )
             ORDER BY COALESCE(display_name, name, username) COLLATE NOCASE ASC, id ASC
             LIMIT ?3;"
        ))?;
        let mut rows = stmt.query(params![
            needle,
            exclude.map(|id| id.to_string()),
            i64::from(limit)
        ])?;

        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(RawUser::from_row(row)?.into_profile()?);
        }
        Ok(users)
    }
}

/// Column values read before id validation.
pub(crate) struct RawUser {
    id: String,
    name: Option<String>,
    username: Option<String>,
    display_name: Option<String>,
    avatar_url: Option<String>,
    email: Option<String>,
}

impl RawUser {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            username: row.get("username")?,
            display_name: row.get("display_name")?,
            avatar_url: row.get("avatar_url")?,
            email: row.get("email")?,
        })
    }

    pub(crate) fn into_profile(self) -> RepoResult<UserProfile> {
        Ok(UserProfile {
            id: parse_user_id(&self.id, "users.id")?,
            name: self.name,
            username: self.username,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            email: self.email,
        })
    }
}
