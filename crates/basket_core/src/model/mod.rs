//! Application domain model.
//!
//! # Responsibility
//! - Define the records exchanged between services, storage and callers.
//! - Keep wire names snake_case so stored JSON stays readable.
//!
//! # Invariants
//! - Users are identified by a stable `UserId`; messages and shopping items
//!   by backend-assigned integer ids.

pub mod message;
pub mod shopping;
pub mod user;
