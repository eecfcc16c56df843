/// Project store
///
/// Owns the project file. Every call re-reads from disk and every mutation
/// writes the whole list back (then refreshes the backup if content changed).
/// Callers get owned copies; nothing is cached between calls.

use crate::error::{LaunchpadError, Result};
use crate::store::config::StoreConfig;
use crate::store::models::{commands_from_legacy, ProjectPatch, ProjectRecord};
use crate::store::persist;
use serde_json::Map;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The project registry
#[derive(Debug, Clone)]
pub struct ProjectStore {
    config: StoreConfig,
}

impl ProjectStore {
    /// Open the store at an exact file path
    ///
    /// # Examples
    /// ```no_run
    /// use launchpad_lib::ProjectStore;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let store = ProjectStore::open("data/projects.json")?;
    /// println!("{} projects", store.get_all().len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn open<P: AsRef<Path>>(data_file: P) -> Result<Self> {
        Self::with_config(StoreConfig::at(data_file))
    }

    /// Open the store from a resolved config
    ///
    /// Creates the data directory and an empty project list if needed, then
    /// mirrors the file to the backup so a fresh install has one right away.
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        if let Some(parent) = config.data_file().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let store = Self { config };

        if !store.config.data_file().exists() {
            info!(path = ?store.config.data_file(), "creating empty project list");
            store.save(&mut Vec::new())?;
        }

        persist::mirror_backup(&store.config);

        Ok(store)
    }

    pub fn data_file(&self) -> &Path {
        self.config.data_file()
    }

    pub fn backup_file(&self) -> &Path {
        self.config.backup_file()
    }

    /// Read all projects in file order, propagating read/parse errors
    pub fn try_load(&self) -> Result<Vec<ProjectRecord>> {
        persist::read_projects(self.config.data_file())
    }

    /// Read all projects in file order
    ///
    /// A missing or corrupt file logs a warning and reads as empty. Use
    /// `try_load` to tell the two apart.
    pub fn load(&self) -> Vec<ProjectRecord> {
        match self.try_load() {
            Ok(projects) => projects,
            Err(e) => {
                warn!(path = ?self.config.data_file(), error = %e, "failed to load project list");
                Vec::new()
            }
        }
    }

    /// All projects sorted by `order`
    pub fn get_all(&self) -> Vec<ProjectRecord> {
        let mut projects = self.load();
        projects.sort_by_key(|p| p.order);
        projects
    }

    /// One project by id
    pub fn get(&self, id: &str) -> Option<ProjectRecord> {
        self.load().into_iter().find(|p| p.id == id)
    }

    /// Register a new project
    ///
    /// `commands` defaults to `[legacy_command]` (or nothing when that is
    /// empty). When a list is given, the legacy field follows its first entry.
    ///
    /// # Returns
    /// * `Ok(ProjectRecord)` - The stored project, with fresh id and order
    /// * `Err(DuplicateName)` - Another project has this name
    /// * `Err(InvalidPath)` - `path` does not exist
    pub fn add(
        &self,
        name: &str,
        path: &str,
        legacy_command: &str,
        result_path: &str,
        commands: Option<Vec<String>>,
    ) -> Result<ProjectRecord> {
        let mut projects = self.load();
        renumber(&mut projects);

        if projects.iter().any(|p| p.name == name) {
            return Err(LaunchpadError::DuplicateName(name.to_string()));
        }
        ensure_exists(path)?;

        let mut project = ProjectRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            path: path.to_string(),
            legacy_command: legacy_command.to_string(),
            commands: commands_from_legacy(legacy_command),
            result_path: result_path.to_string(),
            order: projects.len(),
            extra: Map::new(),
        };
        if let Some(commands) = commands {
            project.set_commands(commands);
        }

        projects.push(project.clone());
        self.save(&mut projects)?;

        info!(id = %project.id, name = %project.name, "project added");
        Ok(project)
    }

    /// Apply a partial update
    ///
    /// Only fields set on the patch are touched. When both `commands` and
    /// `legacy_command` are set, `commands` wins and the legacy field follows it.
    pub fn update(&self, id: &str, patch: ProjectPatch) -> Result<ProjectRecord> {
        let mut projects = self.load();
        renumber(&mut projects);

        let index = projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| LaunchpadError::NotFound(id.to_string()))?;

        if let Some(name) = &patch.name {
            if projects.iter().any(|p| p.name == *name && p.id != id) {
                return Err(LaunchpadError::DuplicateName(name.clone()));
            }
        }
        if let Some(path) = &patch.path {
            ensure_exists(path)?;
        }

        let project = &mut projects[index];
        if let Some(name) = patch.name {
            project.name = name;
        }
        if let Some(path) = patch.path {
            project.path = path;
        }
        if let Some(result_path) = patch.result_path {
            project.result_path = result_path;
        }
        match (patch.commands, patch.legacy_command) {
            (Some(commands), _) => project.set_commands(commands),
            (None, Some(legacy)) => project.set_legacy_command(legacy),
            (None, None) => {}
        }

        let updated = project.clone();
        self.save(&mut projects)?;

        debug!(id = %id, "project updated");
        Ok(updated)
    }

    /// Replace a single command in place
    ///
    /// An index past the end leaves the list as is and still returns the project.
    pub fn update_command_at(&self, id: &str, index: usize, command: &str) -> Result<ProjectRecord> {
        let mut projects = self.load();
        renumber(&mut projects);

        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| LaunchpadError::NotFound(id.to_string()))?;

        if index >= project.commands.len() {
            return Ok(project.clone());
        }

        let mut commands = project.commands.clone();
        commands[index] = command.to_string();
        project.set_commands(commands);
        let updated = project.clone();

        self.save(&mut projects)?;
        Ok(updated)
    }

    /// Remove a project
    ///
    /// Returns `false` (and writes nothing) when no project has this id.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut projects = self.load();
        let before = projects.len();
        projects.retain(|p| p.id != id);

        if projects.len() == before {
            return Ok(false);
        }

        self.save(&mut projects)?;
        info!(id = %id, "project deleted");
        Ok(true)
    }

    /// Put projects in the given order
    ///
    /// Ids are placed in the order listed; unknown or repeated ids are ignored.
    /// Projects not mentioned follow, keeping their previous relative order.
    pub fn reorder(&self, ids: &[String]) -> Result<bool> {
        let mut remaining = self.load();
        remaining.sort_by_key(|p| p.order);

        let mut reordered: Vec<ProjectRecord> = Vec::with_capacity(remaining.len());
        for id in ids {
            if let Some(pos) = remaining.iter().position(|p| p.id == *id) {
                let mut project = remaining.remove(pos);
                project.order = reordered.len();
                reordered.push(project);
            }
        }
        for mut project in remaining {
            project.order = reordered.len();
            reordered.push(project);
        }

        self.save(&mut reordered)?;
        Ok(true)
    }

    // Orders are made dense before every write
    fn save(&self, projects: &mut Vec<ProjectRecord>) -> Result<()> {
        renumber(projects);
        persist::write_projects(&self.config, projects)?;
        Ok(())
    }
}

/// Sort by `order` (stable) and renumber 0..N-1
fn renumber(projects: &mut [ProjectRecord]) {
    projects.sort_by_key(|p| p.order);
    for (position, project) in projects.iter_mut().enumerate() {
        project.order = position;
    }
}

fn ensure_exists(path: &str) -> Result<()> {
    if Path::new(path).exists() {
        Ok(())
    } else {
        Err(LaunchpadError::InvalidPath(path.to_string()))
    }
}
