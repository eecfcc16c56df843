/// Store file location
///
/// Resolves where `projects.json` lives: an explicit path, a data directory
/// taken from `APP_DATA_DIR`, or `data/projects.json` relative to the cwd.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming the application data directory
pub const DATA_DIR_ENV: &str = "APP_DATA_DIR";

const DATA_SUBDIR: &str = "data";
const DATA_FILE_NAME: &str = "projects.json";
const BACKUP_FILE_NAME: &str = "projects_backup.json";

/// Resolved locations of the primary and backup files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    data_file: PathBuf,
    backup_file: PathBuf,
}

impl StoreConfig {
    /// Config for a data file at an exact path
    pub fn at<P: AsRef<Path>>(data_file: P) -> Self {
        let data_file = data_file.as_ref().to_path_buf();
        let backup_file = data_file
            .parent()
            .map(|dir| dir.join(BACKUP_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(BACKUP_FILE_NAME));

        Self {
            data_file,
            backup_file,
        }
    }

    /// Pick the data file location
    ///
    /// Explicit path first, then `<data_dir>/data/projects.json` when the
    /// data directory is set and non-empty, then the relative default.
    pub fn resolve(explicit: Option<PathBuf>, data_dir: Option<OsString>) -> Self {
        if let Some(path) = explicit {
            return Self::at(path);
        }

        match data_dir.filter(|dir| !dir.is_empty()) {
            Some(dir) => Self::at(PathBuf::from(dir).join(DATA_SUBDIR).join(DATA_FILE_NAME)),
            None => Self::at(Path::new(DATA_SUBDIR).join(DATA_FILE_NAME)),
        }
    }

    /// Same as `resolve`, reading the data directory from the environment
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        Self::resolve(explicit, env::var_os(DATA_DIR_ENV))
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn backup_file(&self) -> &Path {
        &self.backup_file
    }
}
