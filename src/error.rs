//! Error types for Ekopay.

/// Top-level error type for the app core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Persistent preference store errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing store could not be opened, read, or written.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Stored value for {key} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

/// Navigation errors. A failed request never mutates the back-stack.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("Invalid route {route}: {reason}")]
    InvalidRoute { route: String, reason: String },

    #[error("No route matches {0}")]
    UnknownRoute(String),

    #[error("Route {0} is disabled in this build")]
    RouteDisabled(String),
}

impl NavError {
    pub(crate) fn invalid(route: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRoute {
            route: route.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for the app core.
pub type Result<T> = std::result::Result<T, Error>;
