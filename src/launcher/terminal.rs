/// Per-platform terminal backends
///
/// One backend per supported OS. Each knows how to open a new interactive
/// terminal running a command line, and how to reveal a folder in the file
/// browser. Backends never wait on the session they start.

use crate::error::{LaunchpadError, Result};
use crate::launcher::escape::{
    applescript_escape, cmd_path_escape, double_quote_escape, posix_keep_open_script,
};
use crate::launcher::platform::Platform;
use crate::launcher::spawner::{ProcessSpawner, SpawnRequest};
use std::path::Path;
use tracing::{debug, info};

/// Terminal emulators tried on Linux, in priority order, with the arguments
/// that make each run `bash -c <script>`
pub const LINUX_TERMINALS: &[(&str, &[&str])] = &[
    ("gnome-terminal", &["--", "bash", "-c"]),
    ("xterm", &["-e", "bash", "-c"]),
    ("konsole", &["-e", "bash", "-c"]),
    ("xfce4-terminal", &["-x", "bash", "-c"]),
];

pub trait TerminalBackend {
    fn name(&self) -> &'static str;

    /// Open a new terminal in `dir` running `command_line`
    ///
    /// An empty `command_line` just opens a shell there.
    fn launch(&self, spawner: &dyn ProcessSpawner, dir: &Path, command_line: &str) -> Result<()>;

    /// Show `path` in the platform file browser
    fn open_folder(&self, spawner: &dyn ProcessSpawner, path: &Path) -> Result<()>;
}

/// The backend for a platform, if it has one
pub fn backend_for(platform: &Platform) -> Option<Box<dyn TerminalBackend>> {
    match platform {
        Platform::MacOs => Some(Box::new(TerminalApp)),
        Platform::Linux => Some(Box::new(EmulatorProbe::default())),
        Platform::Windows => Some(Box::new(ConsoleHost)),
        Platform::Other(_) => None,
    }
}

fn open_with(spawner: &dyn ProcessSpawner, opener: &str, path: &Path) -> Result<()> {
    let request = SpawnRequest::new(opener).arg(path.to_string_lossy());
    spawner
        .spawn_detached(&request)
        .map_err(|e| LaunchpadError::OpenFailed(format!("{}: {}", opener, e)))
}

/// macOS: drive Terminal.app through AppleScript
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalApp;

impl TerminalApp {
    /// The AppleScript handed to `osascript`
    pub fn script(dir: &Path, command_line: &str) -> String {
        let cd = format!("cd \"{}\"", double_quote_escape(&dir.to_string_lossy()));
        let shell_line = if command_line.is_empty() {
            cd
        } else {
            format!("{} && {}", cd, command_line)
        };

        format!(
            "tell application \"Terminal\"\n    activate\n    do script \"{}\"\nend tell",
            applescript_escape(&shell_line)
        )
    }
}

impl TerminalBackend for TerminalApp {
    fn name(&self) -> &'static str {
        "Terminal.app"
    }

    fn launch(&self, spawner: &dyn ProcessSpawner, dir: &Path, command_line: &str) -> Result<()> {
        let request = SpawnRequest::new("osascript")
            .arg("-e")
            .arg(Self::script(dir, command_line));

        // osascript returns once Terminal has the script; the session itself runs on
        let outcome = spawner
            .run(&request)
            .map_err(|e| LaunchpadError::LaunchFailed(format!("osascript: {}", e)))?;
        if !outcome.success {
            return Err(LaunchpadError::LaunchFailed(outcome.stderr));
        }

        info!(terminal = self.name(), dir = ?dir, "launched terminal session");
        Ok(())
    }

    fn open_folder(&self, spawner: &dyn ProcessSpawner, path: &Path) -> Result<()> {
        open_with(spawner, "open", path)
    }
}

/// Linux: first installed emulator from a fixed list
#[derive(Debug, Clone)]
pub struct EmulatorProbe {
    candidates: Vec<(String, Vec<String>)>,
}

impl Default for EmulatorProbe {
    fn default() -> Self {
        Self::new(LINUX_TERMINALS)
    }
}

impl EmulatorProbe {
    pub fn new(candidates: &[(&str, &[&str])]) -> Self {
        Self {
            candidates: candidates
                .iter()
                .map(|(program, args)| {
                    (
                        program.to_string(),
                        args.iter().map(|a| a.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|(program, _)| program.as_str())
    }
}

impl TerminalBackend for EmulatorProbe {
    fn name(&self) -> &'static str {
        "terminal emulator"
    }

    fn launch(&self, spawner: &dyn ProcessSpawner, dir: &Path, command_line: &str) -> Result<()> {
        let script = posix_keep_open_script(&dir.to_string_lossy(), command_line);

        for (program, args) in &self.candidates {
            if !spawner.is_available(program) {
                debug!(terminal = %program, "terminal not installed, trying next");
                continue;
            }

            let request = SpawnRequest::new(program.as_str())
                .args(args.iter().cloned())
                .arg(script.as_str())
                .current_dir(dir);
            spawner
                .spawn_detached(&request)
                .map_err(|e| LaunchpadError::LaunchFailed(format!("{}: {}", program, e)))?;

            info!(terminal = %program, dir = ?dir, "launched terminal session");
            return Ok(());
        }

        Err(LaunchpadError::NoTerminalAvailable)
    }

    fn open_folder(&self, spawner: &dyn ProcessSpawner, path: &Path) -> Result<()> {
        open_with(spawner, "xdg-open", path)
    }
}

/// Windows: a fresh cmd.exe console that stays open (`/k`)
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleHost;

impl ConsoleHost {
    /// The line passed to `cmd /k`
    pub fn command_line(dir: &Path, command_line: &str) -> String {
        let cd = format!("cd /d \"{}\"", cmd_path_escape(&dir.to_string_lossy()));
        if command_line.is_empty() {
            cd
        } else {
            format!("{} && {}", cd, command_line)
        }
    }
}

impl TerminalBackend for ConsoleHost {
    fn name(&self) -> &'static str {
        "cmd.exe"
    }

    fn launch(&self, spawner: &dyn ProcessSpawner, dir: &Path, command_line: &str) -> Result<()> {
        let request = SpawnRequest::new("cmd")
            .arg("/k")
            .arg(Self::command_line(dir, command_line))
            .current_dir(dir)
            .new_console();

        spawner
            .spawn_detached(&request)
            .map_err(|e| LaunchpadError::LaunchFailed(format!("cmd: {}", e)))?;

        info!(terminal = self.name(), dir = ?dir, "launched terminal session");
        Ok(())
    }

    fn open_folder(&self, spawner: &dyn ProcessSpawner, path: &Path) -> Result<()> {
        open_with(spawner, "explorer", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::spawner::RunOutcome;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::io;

    #[derive(Default)]
    struct FakeSpawner {
        installed: HashSet<String>,
        fail_spawn: bool,
        run_fails: bool,
        spawned: RefCell<Vec<SpawnRequest>>,
        ran: RefCell<Vec<SpawnRequest>>,
    }

    impl FakeSpawner {
        fn with_installed(programs: &[&str]) -> Self {
            Self {
                installed: programs.iter().map(|p| p.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl ProcessSpawner for FakeSpawner {
        fn is_available(&self, program: &str) -> bool {
            self.installed.contains(program)
        }

        fn spawn_detached(&self, request: &SpawnRequest) -> io::Result<()> {
            if self.fail_spawn {
                return Err(io::Error::new(io::ErrorKind::NotFound, "boom"));
            }
            self.spawned.borrow_mut().push(request.clone());
            Ok(())
        }

        fn run(&self, request: &SpawnRequest) -> io::Result<RunOutcome> {
            self.ran.borrow_mut().push(request.clone());
            Ok(RunOutcome {
                success: !self.run_fails,
                stderr: if self.run_fails {
                    "not authorized".to_string()
                } else {
                    String::new()
                },
            })
        }
    }

    #[test]
    fn test_backend_selection() {
        assert_eq!(backend_for(&Platform::MacOs).unwrap().name(), "Terminal.app");
        assert_eq!(backend_for(&Platform::Windows).unwrap().name(), "cmd.exe");
        assert!(backend_for(&Platform::Linux).is_some());
        assert!(backend_for(&Platform::Other("aix".to_string())).is_none());
    }

    #[test]
    fn test_applescript_escapes_path_and_command() {
        let script = TerminalApp::script(Path::new("/Users/me/my \"app\""), r#"echo "hi""#);

        assert!(script.starts_with("tell application \"Terminal\""));
        assert!(script.contains("activate"));
        // Path: shell-escaped, then AppleScript-escaped
        assert!(script.contains(r#"cd \"/Users/me/my \\\"app\\\"\""#));
        assert!(script.contains(r#"&& echo \"hi\""#));
    }

    #[test]
    fn test_terminal_app_runs_osascript() {
        let spawner = FakeSpawner::default();
        TerminalApp
            .launch(&spawner, Path::new("/srv/app"), "make")
            .unwrap();

        let ran = spawner.ran.borrow();
        assert_eq!(ran.len(), 1);
        assert_eq!(ran[0].program, "osascript");
        assert_eq!(ran[0].args[0], "-e");
    }

    #[test]
    fn test_terminal_app_failure_is_launch_failed() {
        let spawner = FakeSpawner {
            run_fails: true,
            ..Default::default()
        };

        let result = TerminalApp.launch(&spawner, Path::new("/srv/app"), "make");
        assert!(matches!(result, Err(LaunchpadError::LaunchFailed(msg)) if msg == "not authorized"));
    }

    #[test]
    fn test_probe_uses_first_installed_terminal() {
        let spawner = FakeSpawner::with_installed(&["konsole", "xterm"]);
        EmulatorProbe::default()
            .launch(&spawner, Path::new("/srv/app"), "make && make run")
            .unwrap();

        let spawned = spawner.spawned.borrow();
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].program, "xterm");
        assert_eq!(
            spawned[0].args,
            vec![
                "-e",
                "bash",
                "-c",
                "cd '/srv/app' && make && make run; exec bash"
            ]
        );
    }

    #[test]
    fn test_probe_gnome_terminal_args() {
        let spawner = FakeSpawner::with_installed(&["gnome-terminal"]);
        EmulatorProbe::default()
            .launch(&spawner, Path::new("/srv/app"), "")
            .unwrap();

        let spawned = spawner.spawned.borrow();
        assert_eq!(spawned[0].args[..3], ["--", "bash", "-c"]);
        assert_eq!(spawned[0].args[3], "cd '/srv/app'; exec bash");
    }

    #[test]
    fn test_probe_without_terminals() {
        let spawner = FakeSpawner::default();
        let result = EmulatorProbe::default().launch(&spawner, Path::new("/srv/app"), "make");

        assert!(matches!(result, Err(LaunchpadError::NoTerminalAvailable)));
        assert!(spawner.spawned.borrow().is_empty());
    }

    #[test]
    fn test_probe_candidate_order() {
        let probe = EmulatorProbe::default();
        let names: Vec<&str> = probe.candidates().collect();
        assert_eq!(
            names,
            vec!["gnome-terminal", "xterm", "konsole", "xfce4-terminal"]
        );
    }

    #[test]
    fn test_console_host_keeps_window() {
        let spawner = FakeSpawner::default();
        ConsoleHost
            .launch(&spawner, Path::new(r"C:\work\app"), "npm i && npm start")
            .unwrap();

        let spawned = spawner.spawned.borrow();
        assert_eq!(spawned[0].program, "cmd");
        assert_eq!(spawned[0].args[0], "/k");
        assert_eq!(spawned[0].args[1], r#"cd /d "C:\work\app" && npm i && npm start"#);
        assert!(spawned[0].new_console);
    }

    #[test]
    fn test_spawn_error_is_launch_failed() {
        let spawner = FakeSpawner {
            fail_spawn: true,
            ..Default::default()
        };

        let result = ConsoleHost.launch(&spawner, Path::new("C:\\"), "dir");
        assert!(matches!(result, Err(LaunchpadError::LaunchFailed(_))));
    }

    #[test]
    fn test_open_folder_openers() {
        let spawner = FakeSpawner::default();
        TerminalApp.open_folder(&spawner, Path::new("/a")).unwrap();
        EmulatorProbe::default()
            .open_folder(&spawner, Path::new("/b"))
            .unwrap();
        ConsoleHost.open_folder(&spawner, Path::new("/c")).unwrap();

        let programs: Vec<String> = spawner
            .spawned
            .borrow()
            .iter()
            .map(|r| r.program.clone())
            .collect();
        assert_eq!(programs, vec!["open", "xdg-open", "explorer"]);
    }

    #[test]
    fn test_open_folder_spawn_error() {
        let spawner = FakeSpawner {
            fail_spawn: true,
            ..Default::default()
        };

        let result = EmulatorProbe::default().open_folder(&spawner, Path::new("/b"));
        assert!(matches!(result, Err(LaunchpadError::OpenFailed(_))));
    }
}
