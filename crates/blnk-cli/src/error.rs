//! Error types for the blnk CLI

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the format crate
    #[error(transparent)]
    Format(#[from] blnk_format::Error),

    /// Error from the resolver crate
    #[error(transparent)]
    Resolve(#[from] blnk_resolve::Error),

    /// Error from the launcher crate
    #[error(transparent)]
    Launch(#[from] blnk_launch::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
