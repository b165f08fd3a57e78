//! Error handling for the home-visit client

use std::fmt;
use thiserror::Error;

/// Unified error type for the home-visit client
#[derive(Error, Debug)]
pub enum Error {
    /// Preferences store read/write errors
    #[error("Store error: {0}")]
    Store(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Visit lifecycle errors
    #[error("Visit error: {0}")]
    Visit(String),

    /// Camera capture errors
    #[error("Camera error: {0}")]
    Camera(String),

    /// Geolocation errors
    #[error("Location error: {0}")]
    Location(String),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem errors from the file-backed preferences store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new store error
    pub fn store<T: fmt::Display>(msg: T) -> Self {
        Error::Store(msg.to_string())
    }

    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new visit lifecycle error
    pub fn visit<T: fmt::Display>(msg: T) -> Self {
        Error::Visit(msg.to_string())
    }

    /// Create a new camera error
    pub fn camera<T: fmt::Display>(msg: T) -> Self {
        Error::Camera(msg.to_string())
    }

    /// Create a new location error
    pub fn location<T: fmt::Display>(msg: T) -> Self {
        Error::Location(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }
}
