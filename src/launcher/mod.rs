/// Terminal launching module
///
/// Opens interactive terminal sessions running a project's commands, and
/// reveals folders in the OS file browser.

pub mod dispatcher;
pub mod escape;
pub mod platform;
pub mod spawner;
pub mod terminal;

pub use dispatcher::CommandDispatcher;
pub use platform::Platform;
pub use spawner::{ProcessSpawner, RunOutcome, SpawnRequest, SystemSpawner};
pub use terminal::TerminalBackend;
