//! Application state management

use std::sync::Arc;

use myflix_core::{ClientConfig, FileStore, SessionStore};
use myflix_net::{
    ApiClient, HttpTransport, InvalidBaseUrl, MovieService, ReqwestTransport,
    UserProfileService, UserRegistrationService,
};

use crate::notify::Notifier;

/// Services and shared state handed to every view model
pub struct AppState {
    pub session: Arc<SessionStore>,
    pub registration: UserRegistrationService,
    pub movies: MovieService,
    pub users: UserProfileService,
    pub notifier: Notifier,
}

impl AppState {
    /// Production wiring: file-backed session, reqwest transport
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let session_path = config.session_path()?;
        let session = Arc::new(SessionStore::new(FileStore::open(&session_path)?));
        let transport = Arc::new(ReqwestTransport::new()?);

        tracing::debug!(
            api_url = %config.api_url,
            session = %session_path.display(),
            "Application state ready"
        );

        Ok(Self::with_parts(config, session, transport)?)
    }

    pub fn with_parts(
        config: &ClientConfig,
        session: Arc<SessionStore>,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, InvalidBaseUrl> {
        let client = Arc::new(ApiClient::new(&config.api_url, transport, session.clone())?);

        Ok(Self {
            registration: UserRegistrationService::new(client.clone()),
            movies: MovieService::new(client.clone()),
            users: UserProfileService::new(client),
            session,
            notifier: Notifier::new(),
        })
    }

    /// Username of the logged-in user, if any
    pub fn current_username(&self) -> Option<String> {
        self.session.username()
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use myflix_core::UserProfile;
    use myflix_net::testing::ScriptedTransport;

    /// State wired to a scripted transport and an in-memory session
    pub fn state(transport: Arc<ScriptedTransport>) -> Arc<AppState> {
        let config = ClientConfig::default().with_overrides(Some("http://api.test".into()), None);
        let session = Arc::new(SessionStore::in_memory());
        Arc::new(AppState::with_parts(&config, session, transport).unwrap())
    }

    /// Same as [`state`], with `profile` logged in under token `abc123`
    pub fn logged_in(transport: Arc<ScriptedTransport>, profile: &UserProfile) -> Arc<AppState> {
        let state = state(transport);
        state.session.begin("abc123", profile).unwrap();
        state
    }
}
