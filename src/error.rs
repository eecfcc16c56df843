/// Error types for launchpad
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for launchpad operations
#[derive(Error, Debug)]
pub enum LaunchpadError {
    /// Another project already uses this name
    #[error("Project name '{0}' already exists")]
    DuplicateName(String),

    /// A path that must exist on disk does not
    #[error("Path does not exist: {0}")]
    InvalidPath(String),

    /// No project with the given id
    #[error("Project not found: {0}")]
    NotFound(String),

    /// Running on an OS with no launch support
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// None of the known terminal emulators are installed
    #[error("No terminal emulator found")]
    NoTerminalAvailable,

    /// The terminal session could not be started
    #[error("Failed to launch commands: {0}")]
    LaunchFailed(String),

    /// The file browser could not be started
    #[error("Failed to open folder: {0}")]
    OpenFailed(String),

    /// I/O errors (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Import document has neither a project list nor an export envelope
    #[error("Invalid import data: {0}")]
    InvalidImport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for launchpad operations
pub type Result<T> = std::result::Result<T, LaunchpadError>;

/// Convert LaunchpadError to a user-friendly error message
impl LaunchpadError {
    pub fn user_message(&self) -> String {
        match self {
            LaunchpadError::DuplicateName(name) => {
                format!("A project named '{}' already exists. Pick another name.", name)
            }
            LaunchpadError::InvalidPath(path) => {
                format!("Path '{}' does not exist", path)
            }
            LaunchpadError::NotFound(id) => {
                format!("No project with id '{}'", id)
            }
            LaunchpadError::UnsupportedPlatform(os) => {
                format!("Launching terminals is not supported on '{}'", os)
            }
            LaunchpadError::NoTerminalAvailable => {
                "No terminal emulator found. Install gnome-terminal, xterm, konsole or xfce4-terminal."
                    .to_string()
            }
            LaunchpadError::LaunchFailed(msg) => {
                format!("Could not start the terminal session: {}", msg)
            }
            LaunchpadError::OpenFailed(msg) => {
                format!("Could not open the folder: {}", msg)
            }
            LaunchpadError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            LaunchpadError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            LaunchpadError::InvalidImport(msg) => {
                format!("Import failed: {}", msg)
            }
            LaunchpadError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
        }
    }
}
