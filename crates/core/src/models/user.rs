//! User model

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::parse::{format_long_date, null_as_default};
use super::MovieId;

/// The current user's profile as returned by the API.
///
/// `username`, `email` and `birthday` are never absent: a missing or `null`
/// field decodes to the empty string. The password is write-only and never
/// part of this model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "Username", default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(rename = "Email", default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(rename = "Birthday", default, deserialize_with = "null_as_default")]
    pub birthday: String,
    #[serde(rename = "FavoriteMovies", default, deserialize_with = "null_as_default")]
    pub favorite_movies: BTreeSet<MovieId>,
}

impl UserProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Whether this profile carries a usable identity for addressing `/users/{username}`
    pub fn has_identity(&self) -> bool {
        !self.username.trim().is_empty()
    }

    pub fn is_favorite(&self, id: &MovieId) -> bool {
        self.favorite_movies.contains(id)
    }

    /// Birthday formatted as `January 5, 1990`, empty when unknown
    pub fn birthday_display(&self) -> String {
        format_long_date(&self.birthday)
    }
}

/// Login payload
#[derive(Clone, Serialize)]
pub struct Credentials {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration payload
#[derive(Clone, Default, Serialize)]
pub struct Registration {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "Birthday", skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("email", &self.email)
            .field("birthday", &self.birthday)
            .finish()
    }
}

/// Partial profile update. Absent fields are left untouched by the server.
#[derive(Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(rename = "Username", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "Password", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "Birthday", skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

impl fmt::Debug for ProfileUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileUpdate")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("email", &self.email)
            .field("birthday", &self.birthday)
            .finish()
    }
}

/// Body of a successful `/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Bearer token plus the snapshot of the logged-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub current_user: UserProfile,
}
