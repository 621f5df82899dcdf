//! View models for the myFlix screens

mod auth;
mod favorites;
mod movies;
mod navbar;
mod profile;
mod single_movie;

pub use auth::{LoginForm, RegistrationForm};
pub use favorites::FavoritesViewModel;
pub use movies::{MovieDialog, MovieListViewModel};
pub use navbar::Navbar;
pub use profile::ProfileViewModel;
pub use single_movie::SingleMovieViewModel;

use myflix_net::ApiError;

/// Failure of a view action
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Could not update local session: {0}")]
    Storage(#[from] myflix_core::Error),

    #[error("{0}")]
    Invalid(String),
}
