//! Response translation
//!
//! Turns failed exchanges into the uniform [`ApiError::Failed`] and unwraps
//! successful bodies. Injected into [`crate::ApiClient`]; no service handles
//! errors on its own.

use serde_json::Value;
use tracing::{error, warn};

use crate::error::ApiError;

/// Why an exchange failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// No response came back (connection refused, DNS, TLS, reset)
    Network(String),
    /// The server answered with a non-2xx status
    Server { status: u16, body: String },
    /// A 2xx body did not have the expected shape
    Decode(String),
}

/// Capability shared by every service for turning exchanges into results
pub trait ResponseTranslator: Send + Sync + 'static {
    /// Log a failed exchange and produce the error handed to the caller.
    ///
    /// `request` is the `METHOD /path` line of the failed call.
    fn translate_failure(&self, request: &str, fault: &Fault) -> ApiError;

    /// Unwrap a successful body. An absent body becomes `{}`.
    fn unwrap_body(&self, body: &[u8]) -> Result<Value, Fault>;
}

/// Default translator: logs through `tracing` and always answers `Failed`
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingTranslator;

impl ResponseTranslator for LoggingTranslator {
    fn translate_failure(&self, request: &str, fault: &Fault) -> ApiError {
        match fault {
            Fault::Network(message) => {
                error!(request, %message, "Client-side error");
            }
            Fault::Server { status, body } => {
                error!(request, status, %body, "Server-side error");
            }
            Fault::Decode(message) => {
                warn!(request, %message, "Unexpected response body");
            }
        }
        ApiError::Failed
    }

    fn unwrap_body(&self, body: &[u8]) -> Result<Value, Fault> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Object(Default::default()));
        }
        serde_json::from_slice(body).map_err(|e| Fault::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_fault_becomes_generic_failure() {
        let t = LoggingTranslator;
        let faults = [
            Fault::Network("connection refused".into()),
            Fault::Server { status: 400, body: "bad".into() },
            Fault::Server { status: 401, body: "Unauthorized".into() },
            Fault::Server { status: 500, body: "".into() },
            Fault::Decode("expected value".into()),
        ];
        for fault in &faults {
            assert_eq!(t.translate_failure("GET /movies", fault), ApiError::Failed);
        }
    }

    #[test]
    fn test_body_passes_through_unchanged() {
        let t = LoggingTranslator;
        let body = br#"{"Username":"alice","extra":[1,2,3]}"#;
        assert_eq!(
            t.unwrap_body(body).unwrap(),
            json!({ "Username": "alice", "extra": [1, 2, 3] })
        );
    }

    #[test]
    fn test_absent_body_becomes_empty_object() {
        let t = LoggingTranslator;
        assert_eq!(t.unwrap_body(b"").unwrap(), json!({}));
        assert_eq!(t.unwrap_body(b"  \n").unwrap(), json!({}));
    }

    #[test]
    fn test_non_json_body_is_decode_fault() {
        let t = LoggingTranslator;
        assert!(matches!(t.unwrap_body(b"alice was deleted."), Err(Fault::Decode(_))));
    }
}
