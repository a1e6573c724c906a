//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep CLI and other callers decoupled from storage details.
//!
//! # Invariants
//! - Services receive the acting user's id from their caller; they never
//!   authenticate on their own.
//! - User-supplied text (messages, names, search terms) is never logged,
//!   only its length.

use once_cell::sync::Lazy;
use regex::Regex;

pub mod chat_service;
pub mod contact_service;
pub mod product_draft;
pub mod shopping_service;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Trims and collapses inner whitespace runs to a single space.
pub fn collapse_whitespace(value: &str) -> String {
    WHITESPACE_RE.replace_all(value.trim(), " ").into_owned()
}
