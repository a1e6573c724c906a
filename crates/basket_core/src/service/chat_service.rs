//! Direct chat use-cases.
//!
//! # Responsibility
//! - Send text and product-list messages between users.
//! - Build unread summaries for the dashboard panel.
//!
//! # Invariants
//! - Product lists are never stored empty.
//! - Every stored product carries a category id; missing ones are filled
//!   by the categorizer.
//! - Product-list messages use the list title as their body text.
//! - Only a message's recipient records read receipts for it.

use crate::category::{categorize, Category};
use crate::model::message::{
    ChatMessage, MessageId, MessageKind, NewMessage, ProductItem, ProductListMessage,
    DEFAULT_PRODUCT_LIST_TITLE,
};
use crate::model::user::UserId;
use crate::repo::message_repo::MessageRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use crate::service::collapse_whitespace;
use log::info;
use serde::Serialize;
use thiserror::Error;

const UNREAD_DEFAULT_LIMIT: u32 = 10;
const UNREAD_LIMIT_MAX: u32 = 50;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("message text cannot be empty")]
    EmptyMessage,
    #[error("product list must contain at least one product")]
    EmptyProductList,
    #[error("product #{index} has an empty name")]
    BlankProductName { index: usize },
    #[error("recipient not found: {0}")]
    RecipientNotFound(UserId),
    #[error("message not found: {0}")]
    MessageNotFound(MessageId),
    #[error("only the recipient can mark message {0} as read")]
    NotRecipient(MessageId),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Unread message projection for notification panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreadSummary {
    pub message_id: MessageId,
    pub sender_id: UserId,
    pub sender_label: String,
    pub kind_label: &'static str,
    pub preview: String,
    pub sent_at: i64,
}

/// Chat use-case facade.
pub struct ChatService<U: UserRepository, M: MessageRepository> {
    users: U,
    messages: M,
}

impl<U: UserRepository, M: MessageRepository> ChatService<U, M> {
    pub fn new(users: U, messages: M) -> Self {
        Self { users, messages }
    }

    /// Sends a plain text message. Text is stored as given.
    pub fn send_text(
        &self,
        sender: UserId,
        recipient: UserId,
        text: impl Into<String>,
    ) -> Result<ChatMessage, ChatError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        self.ensure_recipient(recipient)?;

        let stored = self.messages.insert_message(&NewMessage {
            sender_id: sender,
            recipient_id: recipient,
            body: text,
            kind: MessageKind::Text,
            sent_at: crate::now_epoch_ms(),
            product_list: None,
        })?;
        info!(
            "event=message_send module=service status=ok kind=text message_id={} body_len={}",
            stored.id,
            stored.body.chars().count()
        );
        Ok(stored)
    }

    /// Sends a product list after normalizing it.
    pub fn send_product_list(
        &self,
        sender: UserId,
        recipient: UserId,
        list: ProductListMessage,
    ) -> Result<ChatMessage, ChatError> {
        let list = normalize_product_list(list)?;
        self.ensure_recipient(recipient)?;

        let stored = self.messages.insert_message(&NewMessage {
            sender_id: sender,
            recipient_id: recipient,
            body: list.display_title().to_string(),
            kind: MessageKind::ProductList,
            sent_at: crate::now_epoch_ms(),
            product_list: Some(list),
        })?;
        info!(
            "event=message_send module=service status=ok kind=product_list message_id={} products={}",
            stored.id,
            stored.product_list.as_ref().map_or(0, |list| list.products.len())
        );
        Ok(stored)
    }

    /// Full conversation between the viewer and `other`, oldest first.
    pub fn conversation(&self, viewer: UserId, other: UserId) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.messages.list_conversation(viewer, other)?)
    }

    /// Unread messages addressed to the viewer, newest first.
    pub fn unread(&self, viewer: UserId, limit: Option<u32>) -> Result<Vec<UnreadSummary>, ChatError> {
        let limit = normalize_unread_limit(limit);
        let messages = self.messages.list_unread(viewer, limit)?;

        let mut summaries = Vec::with_capacity(messages.len());
        for message in messages {
            let sender_label = self
                .users
                .get_user(message.sender_id)?
                .map(|profile| profile.display_label().to_string())
                .unwrap_or_else(|| message.sender_id.to_string());
            summaries.push(UnreadSummary {
                message_id: message.id,
                sender_id: message.sender_id,
                sender_label,
                kind_label: message.kind.label(),
                preview: message.preview(),
                sent_at: message.sent_at,
            });
        }
        Ok(summaries)
    }

    /// Marks one message addressed to the viewer as read.
    ///
    /// Returns `false` when it was already marked.
    pub fn mark_read(&self, viewer: UserId, message_id: MessageId) -> Result<bool, ChatError> {
        let message = self
            .messages
            .get_message(message_id)?
            .ok_or(ChatError::MessageNotFound(message_id))?;
        if message.recipient_id != viewer {
            return Err(ChatError::NotRecipient(message_id));
        }

        match self.messages.mark_read(message_id, viewer) {
            Ok(marked) => Ok(marked),
            Err(RepoError::NotFound { .. }) => Err(ChatError::MessageNotFound(message_id)),
            Err(err) => Err(err.into()),
        }
    }

    fn ensure_recipient(&self, recipient: UserId) -> Result<(), ChatError> {
        if self.users.get_user(recipient)?.is_none() {
            return Err(ChatError::RecipientNotFound(recipient));
        }
        Ok(())
    }
}

/// Validates and normalizes a product list before it is stored.
///
/// Rules:
/// - at least one product;
/// - names trimmed with inner whitespace collapsed, blank names rejected;
/// - quantity `0` becomes `1`;
/// - missing or out-of-range category ids are filled by the categorizer;
/// - blank or missing title becomes [`DEFAULT_PRODUCT_LIST_TITLE`].
pub fn normalize_product_list(list: ProductListMessage) -> Result<ProductListMessage, ChatError> {
    if list.products.is_empty() {
        return Err(ChatError::EmptyProductList);
    }

    let products = list
        .products
        .into_iter()
        .enumerate()
        .map(|(index, product)| {
            let name = collapse_whitespace(&product.name);
            if name.is_empty() {
                return Err(ChatError::BlankProductName { index });
            }
            let category_id = product
                .category_id
                .filter(|id| Category::try_from_id(*id).is_some())
                .unwrap_or_else(|| categorize(&name));
            Ok(ProductItem {
                name,
                quantity: product.quantity.max(1),
                category_id: Some(category_id),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let title = list
        .title
        .map(|title| collapse_whitespace(&title))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| DEFAULT_PRODUCT_LIST_TITLE.to_string());

    Ok(ProductListMessage {
        title: Some(title),
        products,
    })
}

fn normalize_unread_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => UNREAD_DEFAULT_LIMIT,
        Some(value) => value.min(UNREAD_LIMIT_MAX),
    }
}
