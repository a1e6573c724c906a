//! Chat message model.
//!
//! # Responsibility
//! - Define direct messages and their two payload shapes (text and product
//!   list).
//!
//! # Invariants
//! - `kind == ProductList` iff `product_list` is `Some`.
//! - `read_by` never contains duplicates.

use crate::category::CategoryId;
use crate::grouping::{Categorized, Named};
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// Backend-assigned message id.
pub type MessageId = i64;

/// Title used when a product list is sent without one.
pub const DEFAULT_PRODUCT_LIST_TITLE: &str = "قائمة منتجات";

/// Payload discriminator, stored as `message_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Text,
    ProductList,
}

impl MessageKind {
    /// Stable storage string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::ProductList => "product_list",
        }
    }

    /// Parses the storage string.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "product_list" => Some(Self::ProductList),
            _ => None,
        }
    }

    /// Short Arabic label used by notification panels.
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "رسالة",
            Self::ProductList => "قائمة منتجات",
        }
    }
}

/// One named, quantified entry of a product list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductItem {
    pub name: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

impl ProductItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
            category_id: None,
        }
    }
}

impl Categorized for ProductItem {
    fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }
}

impl Named for ProductItem {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Structured chat payload carrying a titled product collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub products: Vec<ProductItem>,
}

impl ProductListMessage {
    /// Title to show, falling back to [`DEFAULT_PRODUCT_LIST_TITLE`].
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or(DEFAULT_PRODUCT_LIST_TITLE)
    }

    /// One-line summary, e.g. `قائمة منتجات (3 منتج)`.
    pub fn summary(&self) -> String {
        format!("{} ({} منتج)", self.display_title(), self.products.len())
    }
}

/// Stored direct message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender_id: UserId,
    pub recipient_id: UserId,
    /// Text body; the list title for product-list messages.
    pub body: String,
    #[serde(rename = "message_type")]
    pub kind: MessageKind,
    /// Epoch milliseconds.
    pub sent_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_list: Option<ProductListMessage>,
    #[serde(default)]
    pub read_by: Vec<UserId>,
}

impl ChatMessage {
    /// Whether `user` has read this message.
    pub fn is_read_by(&self, user: UserId) -> bool {
        self.read_by.contains(&user)
    }

    /// Preview line for notification panels.
    pub fn preview(&self) -> String {
        match (&self.kind, &self.product_list) {
            (MessageKind::ProductList, Some(list)) => list.summary(),
            _ => self.body.clone(),
        }
    }
}

/// Insert shape for a message; the backend assigns id and read state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender_id: UserId,
    pub recipient_id: UserId,
    pub body: String,
    pub kind: MessageKind,
    pub sent_at: i64,
    pub product_list: Option<ProductListMessage>,
}
