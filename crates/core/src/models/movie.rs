//! Movie model

use std::fmt;

use serde::{Deserialize, Serialize};

use super::parse::null_as_default;

/// Server-assigned movie identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the id is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MovieId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MovieId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A catalog entry. Read-only from the client's side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: MovieId,
    #[serde(rename = "Title", default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "Description", default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "Genre", default, deserialize_with = "null_as_default")]
    pub genre: Genre,
    #[serde(rename = "Director", default, deserialize_with = "null_as_default")]
    pub director: Director,
    #[serde(rename = "ImagePath", default, deserialize_with = "null_as_default")]
    pub image_path: String,
    #[serde(rename = "Featured", default, deserialize_with = "null_as_default")]
    pub featured: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(rename = "Name", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "Description", default, deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    #[serde(rename = "Name", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "Bio", default, deserialize_with = "null_as_default")]
    pub bio: String,
    #[serde(rename = "Birth", default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    /// Absent while the director is alive
    #[serde(rename = "Death", default, skip_serializing_if = "Option::is_none")]
    pub death: Option<String>,
}
