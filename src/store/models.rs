/// Data models for stored projects
///
/// `StoredProject` is the loose on-disk shape (older files may lack `commands`
/// and `order`); `ProjectRecord` is the normalized shape every read returns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A launchable project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    pub path: String,
    /// Single-command field kept for files written before `commands` existed
    #[serde(rename = "default_command", default)]
    pub legacy_command: String,
    pub commands: Vec<String>,
    #[serde(default)]
    pub result_path: String,
    pub order: usize,
    /// Keys written by other front-ends, carried through rewrites untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProjectRecord {
    /// Point the legacy field at the first command (or empty)
    pub fn sync_legacy_from_commands(&mut self) {
        self.legacy_command = self.commands.first().cloned().unwrap_or_default();
    }

    /// Replace the whole command list, keeping the legacy field in step
    pub fn set_commands(&mut self, commands: Vec<String>) {
        self.commands = commands;
        self.sync_legacy_from_commands();
    }

    /// Write the legacy field and mirror it into `commands[0]`
    ///
    /// An empty value blanks the first command in place; blank entries are
    /// dropped when the chain is joined for launch.
    pub fn set_legacy_command(&mut self, legacy: String) {
        if let Some(first) = self.commands.first_mut() {
            *first = legacy;
        } else if !legacy.is_empty() {
            self.commands.push(legacy);
        }
        self.sync_legacy_from_commands();
    }
}

/// Commands derived from a legacy single-command value
pub fn commands_from_legacy(legacy: &str) -> Vec<String> {
    if legacy.is_empty() {
        Vec::new()
    } else {
        vec![legacy.to_string()]
    }
}

/// A project as it may appear in an older file
///
/// Other writers may store `null` for the optional text fields, so those are
/// read as `Option` and flattened to `""` on normalize.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StoredProject {
    pub id: String,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub default_command: Option<String>,
    #[serde(default)]
    pub commands: Option<Vec<String>>,
    #[serde(default)]
    pub result_path: Option<String>,
    #[serde(default)]
    pub order: Option<usize>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoredProject {
    /// Back-fill missing fields; `position` is the record's index in the file
    pub fn normalize(self, position: usize) -> ProjectRecord {
        let legacy_command = self.default_command.unwrap_or_default();
        let commands = self
            .commands
            .unwrap_or_else(|| commands_from_legacy(&legacy_command));

        ProjectRecord {
            id: self.id,
            name: self.name,
            path: self.path,
            legacy_command,
            commands,
            result_path: self.result_path.unwrap_or_default(),
            order: self.order.unwrap_or(position),
            extra: self.extra,
        }
    }
}

/// Partial update: `None` leaves a field alone, `Some("")` clears it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub path: Option<String>,
    pub legacy_command: Option<String>,
    pub result_path: Option<String>,
    pub commands: Option<Vec<String>>,
}

impl ProjectPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn legacy_command(mut self, command: impl Into<String>) -> Self {
        self.legacy_command = Some(command.into());
        self
    }

    pub fn result_path(mut self, result_path: impl Into<String>) -> Self {
        self.result_path = Some(result_path.into());
        self
    }

    pub fn commands(mut self, commands: Vec<String>) -> Self {
        self.commands = Some(commands);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Export envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectExport {
    pub version: String,
    pub exported_at: String,
    pub projects: Vec<ProjectRecord>,
}

/// Outcome of a bulk import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}
