//! Error types for myFlix Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Could not determine {0} directory")]
    DataDir(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
