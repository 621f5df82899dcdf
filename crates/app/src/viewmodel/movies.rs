//! Movie list view model

use std::collections::BTreeSet;
use std::sync::Arc;

use myflix_core::{Director, Genre, Movie, MovieId};
use tracing::{error, warn};

use super::favorites::toggle_favorite;
use super::ViewError;
use crate::routes::Route;
use crate::state::AppState;

/// Detail dialogs that can be opened from a movie card
#[derive(Debug, Clone, PartialEq)]
pub enum MovieDialog {
    Synopsis { title: String, description: String },
    Genre(Genre),
    Director(Director),
}

pub struct MovieListViewModel {
    state: Arc<AppState>,
    pub movies: Vec<Movie>,
    favorites: BTreeSet<MovieId>,
}

impl MovieListViewModel {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            movies: Vec::new(),
            favorites: BTreeSet::new(),
        }
    }

    /// Load the catalog and the user's favorites.
    ///
    /// A failed profile fetch is logged and leaves the favorites empty; the
    /// catalog is still shown.
    pub async fn load(&mut self) -> Result<(), ViewError> {
        self.movies = self.state.movies.all_movies().await?;

        match self.state.users.profile().await {
            Ok(profile) => {
                self.favorites = profile.favorite_movies.clone();
                self.state.session.replace_snapshot(&profile)?;
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch user profile");
            }
        }
        Ok(())
    }

    pub fn is_favorite(&self, id: &MovieId) -> bool {
        self.favorites.contains(id)
    }

    /// Toggle a favorite. Returns true when the movie is now a favorite.
    pub async fn toggle_favorite(&mut self, id: &MovieId) -> Result<bool, ViewError> {
        let toggled = toggle_favorite(&self.state, &self.favorites, id)
            .await
            .map_err(|e| {
                error!(id = %id, error = %e, "Favorite toggle failed");
                e
            })?;
        self.favorites = toggled.favorites;
        Ok(self.is_favorite(id))
    }

    fn find(&self, id: &MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| &m.id == id)
    }

    pub fn synopsis(&self, id: &MovieId) -> Option<MovieDialog> {
        self.find(id).map(|m| MovieDialog::Synopsis {
            title: m.title.clone(),
            description: m.description.clone(),
        })
    }

    pub fn genre(&self, id: &MovieId) -> Option<MovieDialog> {
        self.find(id).map(|m| MovieDialog::Genre(m.genre.clone()))
    }

    pub fn director(&self, id: &MovieId) -> Option<MovieDialog> {
        self.find(id).map(|m| MovieDialog::Director(m.director.clone()))
    }

    /// Route of the detail page for a movie
    pub fn single_movie_route(movie: &Movie) -> Route {
        Route::Movie(movie.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support;
    use myflix_core::UserProfile;
    use myflix_net::testing::ScriptedTransport;
    use myflix_net::Method;
    use serde_json::json;

    fn catalog(transport: &ScriptedTransport) {
        transport.reply_json(
            Method::Get,
            "/movies",
            200,
            json!([
                {
                    "_id": "m1",
                    "Title": "Inception",
                    "Description": "Dreams within dreams.",
                    "Genre": { "Name": "Sci-Fi", "Description": "Speculative." },
                    "Director": { "Name": "Christopher Nolan", "Bio": "Filmmaker.", "Birth": "1970-07-30" }
                },
                { "_id": "m2", "Title": "Heat" }
            ]),
        );
    }

    #[tokio::test]
    async fn test_load_mirrors_profile_into_snapshot() {
        let transport = Arc::new(ScriptedTransport::new());
        catalog(&transport);
        transport.reply_json(
            Method::Get,
            "/users/alice",
            200,
            json!({ "Username": "alice", "Email": "fresh@example.com", "FavoriteMovies": ["m2"] }),
        );
        let state = test_support::logged_in(transport, &UserProfile::new("alice"));

        let mut vm = MovieListViewModel::new(state.clone());
        vm.load().await.unwrap();

        assert_eq!(vm.movies.len(), 2);
        assert!(vm.is_favorite(&MovieId::from("m2")));
        assert!(!vm.is_favorite(&MovieId::from("m1")));
        assert_eq!(state.session.snapshot().email, "fresh@example.com");
    }

    #[tokio::test]
    async fn test_load_survives_profile_failure() {
        let transport = Arc::new(ScriptedTransport::new());
        catalog(&transport);
        transport.reply_text(Method::Get, "/users/alice", 500, "boom");
        let state = test_support::logged_in(transport, &UserProfile::new("alice"));

        let mut vm = MovieListViewModel::new(state);
        vm.load().await.unwrap();
        assert_eq!(vm.movies.len(), 2);
        assert!(!vm.is_favorite(&MovieId::from("m2")));
    }

    #[tokio::test]
    async fn test_toggle_from_movie_list_updates_snapshot() {
        let transport = Arc::new(ScriptedTransport::new());
        catalog(&transport);
        transport.reply_json(
            Method::Get,
            "/users/alice",
            200,
            json!({ "Username": "alice", "FavoriteMovies": [] }),
        );
        transport.reply_json(
            Method::Post,
            "/users/alice/movies/m1",
            200,
            json!({ "Username": "alice", "FavoriteMovies": ["m1"] }),
        );
        let state = test_support::logged_in(transport.clone(), &UserProfile::new("alice"));

        let mut vm = MovieListViewModel::new(state.clone());
        vm.load().await.unwrap();

        let m1 = MovieId::from("m1");
        assert!(vm.toggle_favorite(&m1).await.unwrap());
        assert!(vm.is_favorite(&m1));
        assert!(state.session.snapshot().is_favorite(&m1));
        assert_eq!(state.notifier.messages(), vec!["Movie saved to favorites!"]);
    }

    #[tokio::test]
    async fn test_dialogs_expose_movie_details() {
        let transport = Arc::new(ScriptedTransport::new());
        catalog(&transport);
        let state = test_support::logged_in(transport, &UserProfile::new("alice"));

        let mut vm = MovieListViewModel::new(state);
        vm.load().await.unwrap();

        let m1 = MovieId::from("m1");
        assert_eq!(
            vm.synopsis(&m1),
            Some(MovieDialog::Synopsis {
                title: "Inception".into(),
                description: "Dreams within dreams.".into(),
            })
        );
        match vm.director(&m1) {
            Some(MovieDialog::Director(d)) => assert_eq!(d.name, "Christopher Nolan"),
            other => panic!("unexpected dialog: {:?}", other),
        }
        match vm.genre(&m1) {
            Some(MovieDialog::Genre(g)) => assert_eq!(g.name, "Sci-Fi"),
            other => panic!("unexpected dialog: {:?}", other),
        }
        assert!(vm.synopsis(&MovieId::from("missing")).is_none());
        assert_eq!(
            MovieListViewModel::single_movie_route(&vm.movies[1]),
            Route::Movie(MovieId::from("m2"))
        );
    }
}
