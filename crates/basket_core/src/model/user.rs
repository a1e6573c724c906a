//! User profiles and contact projections.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier issued by the authentication backend.
pub type UserId = Uuid;

const FALLBACK_DISPLAY_LABEL: &str = "مستخدم";

/// Public profile fields of an application user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: Option<String>,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
}

impl UserProfile {
    /// Creates a profile with a generated id and only `name` populated.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: Some(name.into()),
            username: None,
            display_name: None,
            avatar_url: None,
            email: None,
        }
    }

    /// Builder-style username setter.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Builder-style display name setter.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Builder-style email setter.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Best label for UI display.
    ///
    /// Fallback order: display name, name, username, email, then a generic
    /// label. Blank values are skipped.
    pub fn display_label(&self) -> &str {
        [
            self.display_name.as_deref(),
            self.name.as_deref(),
            self.username.as_deref(),
            self.email.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .unwrap_or(FALLBACK_DISPLAY_LABEL)
    }
}

/// Directed contact relation as listed for its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub profile: UserProfile,
    /// Epoch milliseconds when the relation was created.
    pub added_at: i64,
}

/// User search result annotated relative to the searching user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSearchHit {
    pub profile: UserProfile,
    pub is_contact: bool,
}

#[cfg(test)]
mod tests {
    use super::UserProfile;

    #[test]
    fn display_label_prefers_display_name_and_skips_blanks() {
        let profile = UserProfile::new("Omar").with_display_name("  ");
        assert_eq!(profile.display_label(), "Omar");

        let profile = profile.with_display_name("أبو عمر");
        assert_eq!(profile.display_label(), "أبو عمر");
    }

    #[test]
    fn display_label_falls_back_to_generic_label() {
        let mut profile = UserProfile::new("");
        profile.name = None;
        assert_eq!(profile.display_label(), "مستخدم");
    }
}
