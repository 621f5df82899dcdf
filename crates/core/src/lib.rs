//! myFlix Core Library
//!
//! Data model, session storage, and configuration for the myFlix client.

pub mod config;
pub mod error;
pub mod models;
pub mod storage;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use models::*;
pub use storage::{FileStore, KeyValueStore, MemoryStore, SessionStore};
