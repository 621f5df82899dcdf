//! Single movie view model

use std::sync::Arc;

use myflix_core::{Movie, MovieId};

use super::ViewError;
use crate::state::AppState;

pub struct SingleMovieViewModel {
    state: Arc<AppState>,
    pub movie: Option<Movie>,
}

impl SingleMovieViewModel {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state, movie: None }
    }

    /// Load the movie named by the route. Without an id nothing is fetched.
    pub async fn load(&mut self, id: Option<&MovieId>) -> Result<(), ViewError> {
        let Some(id) = id else {
            return Ok(());
        };
        self.movie = Some(self.state.movies.single_movie(id).await?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support;
    use myflix_core::UserProfile;
    use myflix_net::testing::ScriptedTransport;
    use myflix_net::{ApiError, Method};
    use serde_json::json;

    #[tokio::test]
    async fn test_load_by_id() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json(
            Method::Get,
            "/movies/m1",
            200,
            json!({ "_id": "m1", "Title": "Inception", "Genre": { "Name": "Sci-Fi" } }),
        );
        let state = test_support::logged_in(transport, &UserProfile::new("alice"));

        let mut vm = SingleMovieViewModel::new(state);
        vm.load(Some(&MovieId::from("m1"))).await.unwrap();
        assert_eq!(vm.movie.as_ref().unwrap().title, "Inception");
        assert_eq!(vm.movie.as_ref().unwrap().genre.name, "Sci-Fi");
    }

    #[tokio::test]
    async fn test_absent_id_skips_loading() {
        let transport = Arc::new(ScriptedTransport::new());
        let state = test_support::logged_in(transport.clone(), &UserProfile::new("alice"));

        let mut vm = SingleMovieViewModel::new(state);
        vm.load(None).await.unwrap();
        assert!(vm.movie.is_none());
        assert_eq!(transport.total(), 0);
    }

    #[tokio::test]
    async fn test_blank_id_is_precondition_error() {
        let transport = Arc::new(ScriptedTransport::new());
        let state = test_support::logged_in(transport.clone(), &UserProfile::new("alice"));

        let mut vm = SingleMovieViewModel::new(state);
        let err = vm.load(Some(&MovieId::from(""))).await.unwrap_err();
        assert!(matches!(err, ViewError::Api(ApiError::MissingMovieId)));
        assert_eq!(transport.total(), 0);
    }
}
