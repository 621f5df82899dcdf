//! Storage backend traits
//!
//! The session cache is a flat string-to-string map, allowing for different
//! implementations (file-backed, in-memory for tests).

use crate::error::Result;

/// Flat key-value cache
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
