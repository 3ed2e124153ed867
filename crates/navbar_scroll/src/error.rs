//! Navbar error types

use thiserror::Error;

/// Errors from attaching a coordinator or loading its configuration
#[derive(Error, Debug)]
pub enum NavBarError {
    /// `attach` called on a coordinator that is already attached
    #[error("Coordinator is already attached; detach it first")]
    AlreadyAttached,

    /// `detach` called with nothing attached
    #[error("Coordinator is not attached")]
    NotAttached,

    /// Failed to read a configuration file
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for `NavBarConfig`
    #[error("Failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for navbar operations
pub type Result<T> = std::result::Result<T, NavBarError>;
