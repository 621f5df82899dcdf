//! Favorites view model
//!
//! Keeps the displayed favorites consistent with the server's set. After an
//! add or a remove the new set always comes from the server: the echoed
//! `FavoriteMovies` when the response carries it, otherwise one profile
//! re-fetch. If that re-fetch fails the change is applied locally.

use std::collections::BTreeSet;
use std::sync::Arc;

use myflix_core::{Movie, MovieId};
use tracing::{debug, error, warn};

use super::ViewError;
use crate::state::AppState;

/// Result of a favorite toggle
pub(crate) struct Toggled {
    /// Server's favorites after the change
    pub favorites: BTreeSet<MovieId>,
    /// True when the movie was added, false when removed
    pub added: bool,
}

/// Add `id` if absent from `current`, remove it otherwise, then mirror the
/// resulting set into the session snapshot.
pub(crate) async fn toggle_favorite(
    state: &AppState,
    current: &BTreeSet<MovieId>,
    id: &MovieId,
) -> Result<Toggled, ViewError> {
    let adding = !current.contains(id);

    let result = if adding {
        state.users.add_favorite(id).await
    } else {
        state.users.remove_favorite(id).await
    };

    let echoed = result.map_err(|e| {
        error!(id = %id, adding, error = %e, "Failed to change favorite");
        e
    })?;

    let favorites = match echoed {
        Some(favorites) => favorites,
        None => {
            debug!("Favorites not echoed, re-fetching profile");
            match state.users.profile().await {
                Ok(profile) => profile.favorite_movies,
                Err(e) => {
                    // The change went through, only the read-back failed
                    warn!(
                        id = %id,
                        error = %e,
                        "Profile re-fetch failed, applying change locally"
                    );
                    let mut favorites = current.clone();
                    if adding {
                        favorites.insert(id.clone());
                    } else {
                        favorites.remove(id);
                    }
                    favorites
                }
            }
        }
    };

    state.session.set_favorites(&favorites)?;
    state.notifier.notify(if adding {
        "Movie saved to favorites!"
    } else {
        "Movie removed from favorites!"
    });

    Ok(Toggled {
        favorites,
        added: adding,
    })
}

pub struct FavoritesViewModel {
    state: Arc<AppState>,
    favorite_ids: BTreeSet<MovieId>,
    catalog: Option<Vec<Movie>>,
    /// Favorite movies, in catalog order
    pub movies: Vec<Movie>,
}

impl FavoritesViewModel {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            favorite_ids: BTreeSet::new(),
            catalog: None,
            movies: Vec::new(),
        }
    }

    /// Fetch the profile's favorites, fetch the catalog if not held yet, and
    /// filter the catalog down to the favorites
    pub async fn refresh(&mut self) -> Result<(), ViewError> {
        let profile = self.state.users.profile().await.map_err(|e| {
            error!(error = %e, "Failed to fetch favorite movies");
            e
        })?;
        self.favorite_ids = profile.favorite_movies;
        self.ensure_catalog().await?;
        self.refilter();
        Ok(())
    }

    /// Toggle a movie in or out of the favorites
    pub async fn toggle(&mut self, id: &MovieId) -> Result<bool, ViewError> {
        let toggled = toggle_favorite(&self.state, &self.favorite_ids, id).await?;
        self.favorite_ids = toggled.favorites;
        self.ensure_catalog().await?;
        self.refilter();
        Ok(toggled.added)
    }

    async fn ensure_catalog(&mut self) -> Result<(), ViewError> {
        if self.catalog.is_none() {
            self.catalog = Some(self.state.movies.all_movies().await?);
        }
        Ok(())
    }

    fn refilter(&mut self) {
        self.movies = self
            .catalog
            .iter()
            .flatten()
            .filter(|m| self.favorite_ids.contains(&m.id))
            .cloned()
            .collect();
    }
}
