//! Movie catalog retrieval
//!
//! Every call is a fresh round trip; nothing is cached here.

use std::sync::Arc;

use myflix_core::{Movie, MovieId};
use tracing::{debug, instrument};

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::protocol::Method;

pub struct MovieService {
    client: Arc<ApiClient>,
}

impl MovieService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `GET /movies`
    #[instrument(skip(self))]
    pub async fn all_movies(&self) -> Result<Vec<Movie>> {
        let request = self.client.authed(Method::Get, &["movies"]);
        let movies: Vec<Movie> = self.client.fetch_or_default(request).await?;
        debug!(count = movies.len(), "Fetched movies");
        Ok(movies)
    }

    /// `GET /movies/{id}`. A blank id fails without a request.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn single_movie(&self, id: &MovieId) -> Result<Movie> {
        if id.is_blank() {
            return Err(ApiError::MissingMovieId);
        }
        let request = self.client.authed(Method::Get, &["movies", id.as_str()]);
        self.client.fetch_or_default(request).await
    }
}
