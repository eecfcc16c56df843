/// launchpad library
///
/// A local registry of projects and the shell commands that start them,
/// plus a launcher that runs those commands in a new terminal window.

pub mod error;
pub mod launcher;
pub mod store;

// Re-exports for convenience
pub use error::{LaunchpadError, Result};
pub use launcher::CommandDispatcher;
pub use store::{ProjectPatch, ProjectRecord, ProjectStore};
