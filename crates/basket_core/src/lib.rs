//! Core domain logic for the Basket family shopping and messaging app.
//! This crate is the single source of truth for business invariants.

pub mod category;
pub mod config;
pub mod datefmt;
pub mod db;
pub mod grouping;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use category::{categorize, categorize_as, category_label, category_label_en, Category, CategoryId};
pub use config::CoreConfig;
pub use datefmt::{format_epoch_ms, format_rfc3339, format_short, DateFormatError, DateLocale};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use grouping::{group_by_category, CategoryGroup, Categorized, Named};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::message::{
    ChatMessage, MessageId, MessageKind, NewMessage, ProductItem, ProductListMessage,
    DEFAULT_PRODUCT_LIST_TITLE,
};
pub use model::shopping::{NewShoppingItem, ShoppingItem, ShoppingItemId};
pub use model::user::{Contact, UserId, UserProfile, UserSearchHit};
pub use repo::contact_repo::{ContactRepository, SqliteContactRepository};
pub use repo::message_repo::{MessageRepository, SqliteMessageRepository};
pub use repo::shopping_repo::{ShoppingRepository, SqliteShoppingRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::chat_service::{ChatError, ChatService, UnreadSummary};
pub use service::contact_service::{ContactError, ContactService};
pub use service::product_draft::{DraftError, ProductListDraft};
pub use service::shopping_service::{ShoppingError, ShoppingService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Current wall-clock time as Unix epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
