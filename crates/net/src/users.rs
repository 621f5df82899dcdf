//! User profile and favorites
//!
//! Endpoints are addressed by the username held in the session snapshot. The
//! service reads the session but never writes it.

use std::collections::BTreeSet;
use std::sync::Arc;

use myflix_core::{MovieId, ProfileUpdate, UserProfile};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::protocol::{ApiResponse, Method};

/// The part of a favorites response we care about
#[derive(Deserialize)]
struct FavoritesEcho {
    #[serde(rename = "FavoriteMovies", default)]
    favorite_movies: Option<BTreeSet<MovieId>>,
}

pub struct UserProfileService {
    client: Arc<ApiClient>,
}

impl UserProfileService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `GET /users/{username}`. Fails with `MissingSession` before any
    /// request when no user is logged in.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<UserProfile> {
        let username = self.client.require_username()?;
        let request = self.client.authed(Method::Get, &["users", username.as_str()]);
        self.client.fetch(request).await
    }

    /// `PUT /users/{username}`. Returns the server's resulting profile.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let username = self.client.require_username()?;
        let body = serde_json::to_value(update).map_err(|_| ApiError::Failed)?;
        let request = self
            .client
            .authed(Method::Put, &["users", username.as_str()])
            .with_body(body);
        let profile: UserProfile = self.client.fetch(request).await?;
        info!(username = %profile.username, "Profile updated");
        Ok(profile)
    }

    /// `DELETE /users/{username}`. Clearing the session is up to the caller.
    #[instrument(skip(self))]
    pub async fn delete_account(&self, username: &str) -> Result<()> {
        let request = self.client.authed(Method::Delete, &["users", username]);
        self.client.execute(request).await?;
        info!("Account deleted");
        Ok(())
    }

    /// `POST /users/{username}/movies/{id}`.
    ///
    /// Returns the updated favorites when the server echoes the user back.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn add_favorite(&self, id: &MovieId) -> Result<Option<BTreeSet<MovieId>>> {
        self.favorite(Method::Post, id).await
    }

    /// `DELETE /users/{username}/movies/{id}`.
    ///
    /// Returns the updated favorites when the server echoes the user back.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn remove_favorite(&self, id: &MovieId) -> Result<Option<BTreeSet<MovieId>>> {
        self.favorite(Method::Delete, id).await
    }

    async fn favorite(&self, method: Method, id: &MovieId) -> Result<Option<BTreeSet<MovieId>>> {
        let username = self.client.require_username()?;
        if id.is_blank() {
            return Err(ApiError::MissingMovieId);
        }

        let request = self
            .client
            .authed(method, &["users", username.as_str(), "movies", id.as_str()]);
        let resp = self.client.execute(request).await?;
        let echoed = echoed_favorites(&resp);
        debug!(echoed = echoed.is_some(), "Favorites changed");
        Ok(echoed)
    }
}

fn echoed_favorites(resp: &ApiResponse) -> Option<BTreeSet<MovieId>> {
    serde_json::from_slice::<FavoritesEcho>(&resp.body)
        .ok()
        .and_then(|echo| echo.favorite_movies)
}
