// ABOUTME: User identity profiles as supplied by the profile store
// ABOUTME: UserProfile record plus lookup helpers over the profile map
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pact Engine Contributors

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identity record owned by the profile store, read-only to the engine.
///
/// Profiles load asynchronously upstream, so a challenge record may
/// reference ids that have no profile entry yet; the engine treats that
/// as a signaled, recoverable gap rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique user id
    pub id: String,
    /// Provider-supplied display name
    pub display_name: String,
    /// User-chosen name, preferred over the provider name when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Provider-supplied avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// User-uploaded photo URL, preferred over the provider avatar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Contact email, when the provider shares it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Ids of this user's friends
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub friends: Vec<String>,
}

impl UserProfile {
    /// Create a minimal profile with just an id and display name
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            user_name: None,
            avatar_url: None,
            photo_url: None,
            email: None,
            friends: Vec::new(),
        }
    }

    /// The name to show for this user: chosen name over provider name
    #[must_use]
    pub fn preferred_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or(&self.display_name)
    }

    /// The picture to show for this user: uploaded photo over provider avatar
    #[must_use]
    pub fn picture_url(&self) -> Option<&str> {
        self.photo_url.as_deref().or(self.avatar_url.as_deref())
    }

    /// Whether `other` is in this user's friend list
    #[must_use]
    pub fn is_friend_of(&self, other: &str) -> bool {
        self.friends.iter().any(|f| f == other)
    }
}

/// Lookup from user id to profile, the shape the profile store exposes
pub type Profiles = HashMap<String, UserProfile>;

/// Find the profile with the given email, if any
#[must_use]
pub fn find_by_email<'a>(profiles: &'a Profiles, email: &str) -> Option<&'a UserProfile> {
    profiles
        .values()
        .find(|profile| profile.email.as_deref() == Some(email))
}

/// Find the user id owning the given email, if any
#[must_use]
pub fn find_id_by_email<'a>(profiles: &'a Profiles, email: &str) -> Option<&'a str> {
    find_by_email(profiles, email).map(|profile| profile.id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_email(id: &str, email: &str) -> UserProfile {
        UserProfile {
            email: Some(email.into()),
            ..UserProfile::new(id, format!("User {id}"))
        }
    }

    #[test]
    fn test_preferred_name_prefers_chosen_name() {
        let mut profile = UserProfile::new("u1", "Provider Name");
        assert_eq!(profile.preferred_name(), "Provider Name");

        profile.user_name = Some("Chosen".into());
        assert_eq!(profile.preferred_name(), "Chosen");
    }

    #[test]
    fn test_picture_url_prefers_uploaded_photo() {
        let mut profile = UserProfile::new("u1", "User");
        assert_eq!(profile.picture_url(), None);

        profile.avatar_url = Some("https://provider/avatar.png".into());
        assert_eq!(profile.picture_url(), Some("https://provider/avatar.png"));

        profile.photo_url = Some("https://uploads/me.png".into());
        assert_eq!(profile.picture_url(), Some("https://uploads/me.png"));
    }

    #[test]
    fn test_find_by_email() {
        let mut profiles = Profiles::new();
        profiles.insert("u1".into(), profile_with_email("u1", "a@example.com"));
        profiles.insert("u2".into(), profile_with_email("u2", "b@example.com"));

        assert_eq!(find_id_by_email(&profiles, "b@example.com"), Some("u2"));
        assert_eq!(find_id_by_email(&profiles, "c@example.com"), None);
    }
}
