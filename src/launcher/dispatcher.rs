/// Command dispatcher
///
/// Picks the terminal backend once, at construction, from the running
/// platform. Launches are fire-and-forget: once the terminal has been started
/// there is no way to watch, cancel or time out the session.

use crate::error::{LaunchpadError, Result};
use crate::launcher::escape::join_commands;
use crate::launcher::platform::Platform;
use crate::launcher::spawner::{ProcessSpawner, SystemSpawner};
use crate::launcher::terminal::{backend_for, TerminalBackend};
use std::path::Path;
use tracing::debug;

pub struct CommandDispatcher<S: ProcessSpawner = SystemSpawner> {
    platform: Platform,
    backend: Option<Box<dyn TerminalBackend>>,
    spawner: S,
}

impl CommandDispatcher<SystemSpawner> {
    /// Dispatcher for the OS this binary runs on
    pub fn detect() -> Self {
        Self::for_platform(Platform::current(), SystemSpawner)
    }
}

impl<S: ProcessSpawner> CommandDispatcher<S> {
    pub fn for_platform(platform: Platform, spawner: S) -> Self {
        let backend = backend_for(&platform);
        Self {
            platform,
            backend,
            spawner,
        }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    fn backend(&self) -> Result<&dyn TerminalBackend> {
        self.backend
            .as_deref()
            .ok_or_else(|| LaunchpadError::UnsupportedPlatform(self.platform.to_string()))
    }

    /// Open a terminal in `working_dir` running `commands` chained with `&&`
    ///
    /// # Returns
    /// * `Ok(())` - The terminal was started (its commands may still fail)
    /// * `Err(UnsupportedPlatform)` - No backend for this OS; nothing spawned
    /// * `Err(InvalidPath)` - `working_dir` does not exist
    /// * `Err(NoTerminalAvailable)` / `Err(LaunchFailed)` - From the backend
    pub fn launch(&self, working_dir: &Path, commands: &[String]) -> Result<()> {
        let backend = self.backend()?;

        if !working_dir.exists() {
            return Err(LaunchpadError::InvalidPath(
                working_dir.display().to_string(),
            ));
        }

        let command_line = join_commands(commands);
        debug!(backend = backend.name(), command = %command_line, "dispatching launch");
        backend.launch(&self.spawner, working_dir, &command_line)
    }

    /// Open a terminal running only command number `index` (from 0)
    pub fn launch_one(&self, working_dir: &Path, commands: &[String], index: usize) -> Result<()> {
        let single = commands.get(index..=index).ok_or_else(|| {
            LaunchpadError::Config(format!(
                "command index {} out of range ({} commands)",
                index,
                commands.len()
            ))
        })?;

        self.launch(working_dir, single)
    }

    /// Reveal a directory in the platform file browser
    pub fn open_folder(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(LaunchpadError::InvalidPath(path.display().to_string()));
        }

        let backend = self.backend()?;
        backend.open_folder(&self.spawner, path)
    }
}
