//! Direct message repository.
//!
//! # Responsibility
//! - Persist text and product-list messages between two users.
//! - Track per-reader read receipts.
//!
//! # Invariants
//! - Conversations are ordered by `sent_at ASC, id ASC`.
//! - Unread listings exclude the reader's own messages.
//! - Marking a message read twice is a no-op.

use crate::model::message::{ChatMessage, MessageId, MessageKind, NewMessage, ProductListMessage};
use crate::model::user::UserId;
use crate::repo::{parse_user_id, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const MESSAGE_SELECT_SQL: &str = "SELECT
    id,
    sender_id,
    recipient_id,
    body,
    message_type,
    product_list,
    sent_at
FROM messages";

/// Message storage contract.
pub trait MessageRepository {
    fn insert_message(&self, message: &NewMessage) -> RepoResult<ChatMessage>;
    fn get_message(&self, id: MessageId) -> RepoResult<Option<ChatMessage>>;
    /// Messages exchanged between `a` and `b` in either direction.
    fn list_conversation(&self, a: UserId, b: UserId) -> RepoResult<Vec<ChatMessage>>;
    /// Messages addressed to `reader` that they have not read, newest first.
    fn list_unread(&self, reader: UserId, limit: u32) -> RepoResult<Vec<ChatMessage>>;
    /// Records a read receipt; returns `false` when it already existed.
    fn mark_read(&self, id: MessageId, reader: UserId) -> RepoResult<bool>;
}

/// SQLite-backed message repository.
pub struct SqliteMessageRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMessageRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_messages(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<ChatMessage>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut messages = Vec::new();
        while let Some(row) = rows.next()? {
            messages.push(self.parse_message_row(row)?);
        }
        Ok(messages)
    }

    fn parse_message_row(&self, row: &Row<'_>) -> RepoResult<ChatMessage> {
        let id: MessageId = row.get("id")?;
        let sender_text: String = row.get("sender_id")?;
        let recipient_text: String = row.get("recipient_id")?;

        let kind_text: String = row.get("message_type")?;
        let kind = MessageKind::parse(&kind_text).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid message type `{kind_text}` in messages.message_type"
            ))
        })?;

        let product_list = match row.get::<_, Option<String>>("product_list")? {
            Some(raw) => Some(
                serde_json::from_str::<ProductListMessage>(&raw).map_err(|err| {
                    RepoError::InvalidData(format!(
                        "invalid product list json for message {id}: {err}"
                    ))
                })?,
            ),
            None => None,
        };

        if (kind == MessageKind::ProductList) != product_list.is_some() {
            return Err(RepoError::InvalidData(format!(
                "message {id} has type `{kind_text}` but product list presence does not match"
            )));
        }

        Ok(ChatMessage {
            id,
            sender_id: parse_user_id(&sender_text, "messages.sender_id")?,
            recipient_id: parse_user_id(&recipient_text, "messages.recipient_id")?,
            body: row.get("body")?,
            kind,
            sent_at: row.get("sent_at")?,
            product_list,
            read_by: load_readers(self.conn, id)?,
        })
    }
}

impl MessageRepository for SqliteMessageRepository<'_> {
    fn insert_message(&self, message: &NewMessage) -> RepoResult<ChatMessage> {
        let product_list_json = message
            .product_list
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|err| RepoError::InvalidData(format!("unserializable product list: {err}")))?;

        self.conn.execute(
            "INSERT INTO messages (
                sender_id,
                recipient_id,
                body,
                message_type,
                product_list,
                sent_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                message.sender_id.to_string(),
                message.recipient_id.to_string(),
                message.body.as_str(),
                message.kind.as_str(),
                product_list_json,
                message.sent_at,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get_message(id)?
            .ok_or_else(|| RepoError::not_found("message", id))
    }

    fn get_message(&self, id: MessageId) -> RepoResult<Option<ChatMessage>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MESSAGE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(self.parse_message_row(row)?));
        }
        Ok(None)
    }

    fn list_conversation(&self, a: UserId, b: UserId) -> RepoResult<Vec<ChatMessage>> {
        self.query_messages(
            &format!(
                "{MESSAGE_SELECT_SQL}
                 WHERE (sender_id = ?1 AND recipient_id = ?2)
                    OR (sender_id = ?2 AND recipient_id = ?1)
                 ORDER BY sent_at ASC, id ASC;"
            ),
            params![a.to_string(), b.to_string()],
        )
    }

    fn list_unread(&self, reader: UserId, limit: u32) -> RepoResult<Vec<ChatMessage>> {
        self.query_messages(
            &format!(
                "{MESSAGE_SELECT_SQL}
                 WHERE recipient_id = ?1
                   AND sender_id <> ?1
                   AND NOT EXISTS (
                        SELECT 1
                        FROM message_reads r
                        WHERE r.message_id = messages.id
                          AND r.reader_id = ?1
                   )
                 ORDER BY sent_at DESC, id DESC
                 LIMIT ?2;"
            ),
            params![reader.to_string(), i64::from(limit)],
        )
    }

    fn mark_read(&self, id: MessageId, reader: UserId) -> RepoResult<bool> {
        let exists = self
            .conn
            .query_row("SELECT 1 FROM messages WHERE id = ?1;", [id], |_| Ok(()))
            .optional()?
            .is_some();
        if !exists {
            return Err(RepoError::not_found("message", id));
        }

        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO message_reads (message_id, reader_id, read_at)
             VALUES (?1, ?2, ?3);",
            params![id, reader.to_string(), crate::now_epoch_ms()],
        )?;
        Ok(changed == 1)
    }
}

fn load_readers(conn: &Connection, message_id: MessageId) -> RepoResult<Vec<UserId>> {
    let mut stmt = conn.prepare(
        "SELECT reader_id
         FROM message_reads
         WHERE message_id = ?1
         ORDER BY read_at ASC, reader_id ASC;",
    )?;
    let mut rows = stmt.query([message_id])?;
    let mut readers = Vec::new();
    while let Some(row) = rows.next()? {
        let value: String = row.get(0)?;
        readers.push(parse_user_id(&value, "message_reads.reader_id")?);
    }
    Ok(readers)
}
