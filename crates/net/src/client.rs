//! Shared API client
//!
//! Owns the base URL, the transport, the response translator and a handle to
//! the session store. Resource services build requests through it and get back
//! either decoded values or an already-translated [`ApiError`].

use std::sync::Arc;

use myflix_core::SessionStore;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Result, TransportError};
use crate::protocol::{ApiRequest, ApiResponse, Method};
use crate::translate::{Fault, LoggingTranslator, ResponseTranslator};
use crate::transport::HttpTransport;

/// The configured API base URL cannot be used
#[derive(Debug, thiserror::Error)]
#[error("invalid API base URL {0:?}")]
pub struct InvalidBaseUrl(pub String);

pub struct ApiClient {
    base: Url,
    transport: Arc<dyn HttpTransport>,
    translator: Arc<dyn ResponseTranslator>,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        transport: Arc<dyn HttpTransport>,
        session: Arc<SessionStore>,
    ) -> std::result::Result<Self, InvalidBaseUrl> {
        let base = Url::parse(base_url.trim())
            .ok()
            .filter(|u| !u.cannot_be_a_base() && matches!(u.scheme(), "http" | "https"))
            .ok_or_else(|| InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self {
            base,
            transport,
            translator: Arc::new(LoggingTranslator),
            session,
        })
    }

    /// Replace the response translator
    pub fn with_translator(mut self, translator: Arc<dyn ResponseTranslator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Username of the logged-in user, or `MissingSession`
    pub fn require_username(&self) -> Result<String> {
        self.session.username().ok_or(ApiError::MissingSession)
    }

    /// Build a request without credentials. Segments are percent-encoded.
    pub fn request(&self, method: Method, segments: &[&str]) -> ApiRequest {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        ApiRequest {
            method,
            path: url.path().to_string(),
            url: url.to_string(),
            bearer: None,
            body: None,
        }
    }

    /// Build a request carrying the session's bearer token
    pub fn authed(&self, method: Method, segments: &[&str]) -> ApiRequest {
        let mut request = self.request(method, segments);
        request.bearer = self.session.token();
        request
    }

    /// Send a request and require a 2xx response
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let line = request.line();
        match self.transport.send(request).await {
            Ok(resp) if resp.is_success() => Ok(resp),
            Ok(resp) => {
                let fault = Fault::Server {
                    status: resp.status,
                    body: resp.text(),
                };
                Err(self.translator.translate_failure(&line, &fault))
            }
            Err(TransportError::Network(message)) => {
                Err(self.translator.translate_failure(&line, &Fault::Network(message)))
            }
        }
    }

    /// Send a request and return the unwrapped JSON body
    pub async fn fetch_json(&self, request: ApiRequest) -> Result<Value> {
        let line = request.line();
        let resp = self.execute(request).await?;
        self.translator
            .unwrap_body(&resp.body)
            .map_err(|fault| self.translator.translate_failure(&line, &fault))
    }

    /// Send a request and decode the body. An absent body is decoded as `{}`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let line = request.line();
        let value = self.fetch_json(request).await?;
        serde_json::from_value(value).map_err(|e| {
            self.translator
                .translate_failure(&line, &Fault::Decode(e.to_string()))
        })
    }

    /// Like [`ApiClient::fetch`], but an absent body yields `T::default()`
    pub async fn fetch_or_default<T: DeserializeOwned + Default>(
        &self,
        request: ApiRequest,
    ) -> Result<T> {
        let line = request.line();
        let resp = self.execute(request).await?;
        if resp.is_empty() {
            return Ok(T::default());
        }

        let value = self
            .translator
            .unwrap_body(&resp.body)
            .map_err(|fault| self.translator.translate_failure(&line, &fault))?;
        serde_json::from_value(value).map_err(|e| {
            self.translator
                .translate_failure(&line, &Fault::Decode(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::testing::ScriptedTransport;
    use myflix_core::UserProfile;
    use serde_json::json;

    fn client(transport: Arc<ScriptedTransport>) -> ApiClient {
        ApiClient::new("http://api.test", transport, Arc::new(SessionStore::in_memory())).unwrap()
    }

    #[test]
    fn test_rejects_unusable_base_urls() {
        let transport = Arc::new(ScriptedTransport::new());
        let session = Arc::new(SessionStore::in_memory());
        for bad in ["", "not a url", "mailto:someone@example.com", "ftp://files.test"] {
            assert!(ApiClient::new(bad, transport.clone(), session.clone()).is_err());
        }
    }

    #[test]
    fn test_request_paths_are_joined_and_encoded() {
        let c = client(Arc::new(ScriptedTransport::new()));
        let req = c.request(Method::Get, &["users", "jane doe", "movies", "a/b"]);
        assert_eq!(req.path, "/users/jane%20doe/movies/a%2Fb");
        assert_eq!(req.url, "http://api.test/users/jane%20doe/movies/a%2Fb");
        assert!(req.bearer.is_none());
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let c = ApiClient::new(
            "http://api.test/v1/",
            Arc::new(ScriptedTransport::new()),
            Arc::new(SessionStore::in_memory()),
        )
        .unwrap();
        assert_eq!(c.request(Method::Get, &["movies"]).path, "/v1/movies");
    }

    #[test]
    fn test_authed_requests_carry_session_token() {
        let c = client(Arc::new(ScriptedTransport::new()));
        assert!(c.authed(Method::Get, &["movies"]).bearer.is_none());

        c.session().begin("abc123", &UserProfile::new("alice")).unwrap();
        assert_eq!(
            c.authed(Method::Get, &["movies"]).bearer.as_deref(),
            Some("abc123")
        );
    }

    #[tokio::test]
    async fn test_non_success_and_network_errors_are_uniform() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_text(Method::Get, "/a", 400, "bad request");
        transport.reply_text(Method::Get, "/b", 401, "Unauthorized");
        transport.reply_json(Method::Get, "/c", 500, json!({ "error": "boom" }));
        transport.fail(Method::Get, "/d");
        let c = client(transport);

        for path in ["a", "b", "c", "d"] {
            let err = c.execute(c.request(Method::Get, &[path])).await.unwrap_err();
            assert_eq!(err, ApiError::Failed);
        }
    }

    #[tokio::test]
    async fn test_fetch_or_default_on_empty_body() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_empty(Method::Get, "/movies", 200);
        let c = client(transport);

        let movies: Vec<myflix_core::Movie> =
            c.fetch_or_default(c.request(Method::Get, &["movies"])).await.unwrap();
        assert!(movies.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_json_substitutes_empty_object() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_empty(Method::Post, "/users", 201);
        let c = client(transport);

        let body = c.fetch_json(c.request(Method::Post, &["users"])).await.unwrap();
        assert_eq!(body, json!({}));
    }

    #[tokio::test]
    async fn test_decode_mismatch_is_generic_failure() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json(Method::Get, "/movies", 200, json!({ "not": "a list" }));
        let c = client(transport);

        let result: Result<Vec<myflix_core::Movie>> =
            c.fetch_or_default(c.request(Method::Get, &["movies"])).await;
        assert_eq!(result.unwrap_err(), ApiError::Failed);
    }

    struct CountingTranslator(AtomicUsize);

    impl ResponseTranslator for CountingTranslator {
        fn translate_failure(&self, _request: &str, _fault: &Fault) -> ApiError {
            self.0.fetch_add(1, Ordering::SeqCst);
            ApiError::Failed
        }

        fn unwrap_body(&self, body: &[u8]) -> std::result::Result<Value, Fault> {
            LoggingTranslator.unwrap_body(body)
        }
    }

    #[tokio::test]
    async fn test_injected_translator_sees_every_failure() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_text(Method::Get, "/movies", 503, "down");
        let translator = Arc::new(CountingTranslator(AtomicUsize::new(0)));
        let c = client(transport).with_translator(translator.clone());

        let _ = c.execute(c.request(Method::Get, &["movies"])).await;
        let _ = c.execute(c.request(Method::Get, &["unscripted"])).await;
        assert_eq!(translator.0.load(Ordering::SeqCst), 2);
    }
}
