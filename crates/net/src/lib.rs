//! myFlix API access layer
//!
//! Stateless services over the myFlix REST API, one per resource area.
//!
//! # Architecture
//!
//! - **Transport**: sends one request, returns the raw response
//! - **Translator**: collapses failures into [`ApiError::Failed`], unwraps bodies
//! - **ApiClient**: base URL, auth header injection, decoding
//! - **Services**: registration/login, movies, user profile and favorites
//!
//! # Usage
//!
//! ```ignore
//! let session = Arc::new(SessionStore::in_memory());
//! let transport = Arc::new(ReqwestTransport::new()?);
//! let client = Arc::new(ApiClient::new(DEFAULT_API_URL, transport, session)?);
//!
//! let movies = MovieService::new(client.clone()).all_movies().await?;
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod movies;
pub mod protocol;
pub mod translate;
pub mod transport;
pub mod users;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use auth::UserRegistrationService;
pub use client::{ApiClient, InvalidBaseUrl};
pub use error::{ApiError, Result, TransportError, GENERIC_FAILURE};
pub use movies::MovieService;
pub use protocol::{ApiRequest, ApiResponse, Method};
pub use translate::{Fault, LoggingTranslator, ResponseTranslator};
pub use transport::{HttpTransport, ReqwestTransport};
pub use users::UserProfileService;
