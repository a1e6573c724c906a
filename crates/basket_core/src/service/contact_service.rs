//! Contact search and management use-cases.
//!
//! # Invariants
//! - Search terms shorter than [`MIN_SEARCH_TERM_CHARS`] return no results.
//! - Search never returns the searching user.
//! - Matching ignores case for any script, not only ASCII.

use crate::model::user::{Contact, UserId, UserSearchHit};
use crate::repo::contact_repo::ContactRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use crate::service::collapse_whitespace;
use log::info;
use thiserror::Error;

/// Minimum number of characters before a search hits storage.
pub const MIN_SEARCH_TERM_CHARS: usize = 2;
/// Maximum number of search hits returned.
pub const SEARCH_RESULT_LIMIT: u32 = 20;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("a user cannot add themselves as a contact")]
    SelfContact,
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Contact use-case facade over user and contact repositories.
pub struct ContactService<U: UserRepository, C: ContactRepository> {
    users: U,
    contacts: C,
}

impl<U: UserRepository, C: ContactRepository> ContactService<U, C> {
    pub fn new(users: U, contacts: C) -> Self {
        Self { users, contacts }
    }

    /// Finds users to add, flagged with whether they are already contacts.
    pub fn search(&self, viewer: UserId, term: &str) -> Result<Vec<UserSearchHit>, ContactError> {
        let term = collapse_whitespace(term);
        if term.chars().count() < MIN_SEARCH_TERM_CHARS {
            info!(
                "event=contact_search module=service status=skipped term_len={}",
                term.chars().count()
            );
            return Ok(Vec::new());
        }

        let known = self.contacts.contact_ids(viewer)?;
        let hits = self
            .users
            .search_users(&term, Some(viewer), SEARCH_RESULT_LIMIT)?
            .into_iter()
            .map(|profile| UserSearchHit {
                is_contact: known.contains(&profile.id),
                profile,
            })
            .collect::<Vec<_>>();

        info!(
            "event=contact_search module=service status=ok term_len={} hits={}",
            term.chars().count(),
            hits.len()
        );
        Ok(hits)
    }

    /// Adds `contact` to the viewer's list.
    ///
    /// Returns `false` when the relation already existed.
    pub fn add(&self, viewer: UserId, contact: UserId) -> Result<bool, ContactError> {
        if viewer == contact {
            return Err(ContactError::SelfContact);
        }
        if self.users.get_user(contact)?.is_none() {
            return Err(ContactError::UserNotFound(contact));
        }

        let created = self.contacts.add_contact(viewer, contact)?;
        info!("event=contact_add module=service status=ok created={created}");
        Ok(created)
    }

    /// Removes `contact` from the viewer's list.
    ///
    /// Returns `false` when it was not a contact.
    pub fn remove(&self, viewer: UserId, contact: UserId) -> Result<bool, ContactError> {
        let removed = self.contacts.remove_contact(viewer, contact)?;
        info!("event=contact_remove module=service status=ok removed={removed}");
        Ok(removed)
    }

    /// Lists the viewer's contacts.
    pub fn list(&self, viewer: UserId) -> Result<Vec<Contact>, ContactError> {
        Ok(self.contacts.list_contacts(viewer)?)
    }
}
