use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur in the memory pet application.
///
/// The pet core never fails: decay and interactions are total functions and
/// unknown commands are an ordinary outcome. Only the surrounding shell
/// (configuration, sprites, terminal I/O, menu construction) reports errors.
#[derive(Error, Debug)]
pub enum PetError {
    /// Error when reading or parsing the configuration file
    #[error("Configuration error: {0}")]
    ConfigurationError(Arc<String>),

    /// Error when a configuration file has an unsupported extension
    #[error("Unsupported config format for {path}")]
    UnsupportedConfigFormat { path: PathBuf },

    /// Error when trying to access a sprite file or directory
    #[error("Sprite access error for {path}: {message}")]
    SpriteAccessError { path: PathBuf, message: Arc<String> },

    /// Error when a menu pane is declared without items
    #[error("Menu pane {pane} has no items")]
    EmptyPane { pane: &'static str },

    /// Error when a submenu link appears outside the main pane, or points at it
    #[error("Menu item '{label}' links to a pane it cannot open")]
    InvalidLink { label: Arc<String> },

    /// Terminal or filesystem I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Type alias for Result with PetError
pub type Result<T> = std::result::Result<T, PetError>;

impl PetError {
    /// Shorthand for a configuration error with a formatted message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationError(Arc::new(message.into()))
    }

    /// Whether the error came from user-supplied files rather than the terminal
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationError(_)
                | Self::UnsupportedConfigFormat { .. }
                | Self::SpriteAccessError { .. }
        )
    }
}
