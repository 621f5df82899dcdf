//! Navigation surface
//!
//! Five addressable views plus the empty path, which redirects to the
//! welcome page.

use std::fmt;

use myflix_core::MovieId;

/// An addressable view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Welcome,
    Movies,
    Profile,
    Favorites,
    Movie(MovieId),
}

impl Route {
    /// Resolve a path. Returns `None` for unknown paths.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_matches('/');
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        match segments.as_slice() {
            [] | ["welcome"] => Some(Route::Welcome),
            ["movies"] => Some(Route::Movies),
            ["profile"] => Some(Route::Profile),
            ["favorites"] => Some(Route::Favorites),
            ["movies", id] if !id.trim().is_empty() => Some(Route::Movie(MovieId::from(*id))),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Welcome => "/welcome".to_string(),
            Route::Movies => "/movies".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Favorites => "/favorites".to_string(),
            Route::Movie(id) => format!("/movies/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
