//! Registration and login
//!
//! Neither call is authenticated. Persisting the returned token is left to the
//! caller.

use std::sync::Arc;

use myflix_core::{Credentials, LoginResponse, Registration};
use serde_json::Value;
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::protocol::Method;

pub struct UserRegistrationService {
    client: Arc<ApiClient>,
}

impl UserRegistrationService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `POST /users`. Returns the created user as sent by the server.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: &Registration) -> Result<Value> {
        let body = serde_json::to_value(registration).map_err(|_| ApiError::Failed)?;
        let request = self.client.request(Method::Post, &["users"]).with_body(body);
        let created = self.client.fetch_json(request).await?;
        info!("User registered");
        Ok(created)
    }

    /// `POST /login`. Expects `{ token, user }`.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let body = serde_json::to_value(credentials).map_err(|_| ApiError::Failed)?;
        let request = self.client.request(Method::Post, &["login"]).with_body(body);
        let response: LoginResponse = self.client.fetch(request).await?;
        info!("Login accepted");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use myflix_core::SessionStore;
    use serde_json::json;

    fn service(transport: Arc<ScriptedTransport>) -> (UserRegistrationService, Arc<SessionStore>) {
        let session = Arc::new(SessionStore::in_memory());
        let client = ApiClient::new("http://api.test", transport, session.clone()).unwrap();
        (UserRegistrationService::new(Arc::new(client)), session)
    }

    #[tokio::test]
    async fn test_register_posts_json_without_auth() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json(
            Method::Post,
            "/users",
            201,
            json!({ "_id": "u1", "Username": "alice", "Email": "a@example.com" }),
        );
        let (svc, _) = service(transport.clone());

        let registration = Registration {
            username: "alice".into(),
            password: "secret".into(),
            email: Some("a@example.com".into()),
            birthday: None,
        };
        let created = svc.register(&registration).await.unwrap();
        assert_eq!(created["Username"], "alice");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].bearer.is_none());
        assert_eq!(
            requests[0].body,
            Some(json!({ "Username": "alice", "Password": "secret", "Email": "a@example.com" }))
        );
    }

    #[tokio::test]
    async fn test_register_conflict_is_generic_failure() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_text(Method::Post, "/users", 400, "alice already exists");
        let (svc, _) = service(transport);

        let registration = Registration {
            username: "alice".into(),
            password: "secret".into(),
            ..Default::default()
        };
        assert_eq!(svc.register(&registration).await.unwrap_err(), ApiError::Failed);
    }

    #[tokio::test]
    async fn test_login_returns_token_and_user_without_persisting() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json(
            Method::Post,
            "/login",
            200,
            json!({ "token": "abc123", "user": { "Username": "alice", "FavoriteMovies": [] } }),
        );
        let (svc, session) = service(transport.clone());

        let response = svc.login(&Credentials::new("alice", "secret")).await.unwrap();
        assert_eq!(response.token, "abc123");
        assert_eq!(response.user.username, "alice");
        assert_eq!(response.user.email, "");

        assert!(session.token().is_none());
        assert!(transport.requests()[0].bearer.is_none());
    }

    #[tokio::test]
    async fn test_login_without_token_is_failure() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json(Method::Post, "/login", 200, json!({ "message": "nope" }));
        let (svc, _) = service(transport);

        assert_eq!(
            svc.login(&Credentials::new("alice", "wrong")).await.unwrap_err(),
            ApiError::Failed
        );
    }

    #[tokio::test]
    async fn test_login_network_error_is_failure() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.fail(Method::Post, "/login");
        let (svc, _) = service(transport);

        assert_eq!(
            svc.login(&Credentials::new("alice", "secret")).await.unwrap_err(),
            ApiError::Failed
        );
    }
}
