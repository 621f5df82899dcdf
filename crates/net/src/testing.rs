//! Scripted in-memory transport for tests
//!
//! Replies are registered per `(method, path)`. When several replies are
//! queued for a route they are served in order and the last one repeats.
//! Unscripted routes answer `404`. Every request is recorded.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::protocol::{ApiRequest, ApiResponse, Method};
use crate::transport::HttpTransport;

#[derive(Debug, Clone)]
enum Reply {
    Response(ApiResponse),
    NetworkError(String),
}

#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    log: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    /// Queue a JSON reply
    pub fn reply_json(&self, method: Method, path: &str, status: u16, body: Value) {
        let body = serde_json::to_vec(&body).unwrap_or_default();
        self.push(method, path, Reply::Response(ApiResponse::new(status, body)));
    }

    /// Queue a reply with a raw text body
    pub fn reply_text(&self, method: Method, path: &str, status: u16, body: &str) {
        self.push(method, path, Reply::Response(ApiResponse::new(status, body)));
    }

    /// Queue a reply with no body
    pub fn reply_empty(&self, method: Method, path: &str, status: u16) {
        self.push(method, path, Reply::Response(ApiResponse::new(status, Vec::new())));
    }

    /// Queue a network failure
    pub fn fail(&self, method: Method, path: &str) {
        self.push(
            method,
            path,
            Reply::NetworkError("connection refused".to_string()),
        );
    }

    /// All requests seen so far
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of requests seen for a route
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Total number of requests seen
    pub fn total(&self) -> usize {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let key = (request.method, request.path.clone());
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        let reply = {
            let mut routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
            match routes.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply {
            Some(Reply::Response(resp)) => Ok(resp),
            Some(Reply::NetworkError(message)) => Err(TransportError::Network(message)),
            None => Ok(ApiResponse::new(404, "not scripted")),
        }
    }
}
