/// Process creation seam
///
/// Every process launchpad starts goes through `ProcessSpawner`, so tests can
/// swap in a double and check what would have been run.

use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

/// A process to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
    /// Give the child its own console window (Windows only)
    pub new_console: bool,
}

impl SpawnRequest {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            new_console: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn new_console(mut self) -> Self {
        self.new_console = true;
        self
    }
}

/// Result of a process that was waited on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub success: bool,
    pub stderr: String,
}

pub trait ProcessSpawner {
    /// Whether `program` can be found on PATH
    fn is_available(&self, program: &str) -> bool;

    /// Start the process and return without waiting for it
    fn spawn_detached(&self, request: &SpawnRequest) -> io::Result<()>;

    /// Start the process and wait for it to exit
    fn run(&self, request: &SpawnRequest) -> io::Result<RunOutcome>;
}

/// Spawns real OS processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner;

impl SystemSpawner {
    fn command(request: &SpawnRequest) -> Command {
        let mut command = Command::new(&request.program);

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;

            if request.new_console {
                command.creation_flags(CREATE_NEW_CONSOLE);
                // cmd.exe does its own parsing; pass the line through untouched
                for arg in &request.args {
                    command.raw_arg(arg);
                }
            } else {
                command.args(&request.args);
            }
        }
        #[cfg(not(windows))]
        command.args(&request.args);

        if let Some(dir) = &request.current_dir {
            command.current_dir(dir);
        }
        command
    }
}

impl ProcessSpawner for SystemSpawner {
    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn spawn_detached(&self, request: &SpawnRequest) -> io::Result<()> {
        let mut child = Self::command(request)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        debug!(program = %request.program, pid = child.id(), "spawned detached process");

        // Reap in the background so the caller never blocks on the session
        thread::spawn(move || {
            let _ = child.wait();
        });

        Ok(())
    }

    fn run(&self, request: &SpawnRequest) -> io::Result<RunOutcome> {
        let output = Self::command(request)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()?;

        Ok(RunOutcome {
            success: output.status.success(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = SpawnRequest::new("xterm")
            .arg("-e")
            .args(["bash", "-c"])
            .current_dir("/tmp")
            .new_console();

        assert_eq!(request.program, "xterm");
        assert_eq!(request.args, vec!["-e", "bash", "-c"]);
        assert_eq!(request.current_dir, Some(PathBuf::from("/tmp")));
        assert!(request.new_console);
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        assert!(!SystemSpawner.is_available("launchpad-no-such-program-7f3a"));
    }

    #[test]
    fn test_spawn_missing_program_errors() {
        let request = SpawnRequest::new("launchpad-no-such-program-7f3a");
        assert!(SystemSpawner.spawn_detached(&request).is_err());
        assert!(SystemSpawner.run(&request).is_err());
    }
}
