//! HTTP transport seam
//!
//! Services never talk to reqwest directly; they hand an [`ApiRequest`] to a
//! [`HttpTransport`]. Production uses [`ReqwestTransport`].

use async_trait::async_trait;
use tracing::debug;

use crate::error::TransportError;
use crate::protocol::{ApiRequest, ApiResponse};

/// Sends one request and returns whatever response came back.
///
/// Non-2xx statuses are not errors at this level; only a missing response is.
#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Transport backed by a shared `reqwest::Client`
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("myflix/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        debug!(request = %request.line(), "Sending request");

        let mut builder = self.http.request(request.method.into(), &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?.to_vec();

        debug!(status, bytes = body.len(), "Response received");
        Ok(ApiResponse { status, body })
    }
}
