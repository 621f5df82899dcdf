//! API error types

/// Message shown to the user for any network or server failure
pub const GENERIC_FAILURE: &str = "Something went wrong; please try again later.";

/// API result type
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors surfaced by the API access layer.
///
/// Transport and server detail is logged and collapsed into [`ApiError::Failed`]
/// before it reaches a caller. Precondition failures stay distinct so a view can
/// tell "not logged in" apart from "the server said no".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{}", GENERIC_FAILURE)]
    Failed,

    #[error("No user is logged in")]
    MissingSession,

    #[error("Movie id must not be empty")]
    MissingMovieId,
}

/// Failure reported by a transport
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response
    #[error("network: {0}")]
    Network(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::Network(e.to_string())
    }
}
