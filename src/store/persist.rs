// Reading and writing the project file, plus the rolling backup copy.
//
// The backup is one fixed-name file beside the primary. It is refreshed only
// when a save actually changes the content (compared as parsed JSON, so key
// order and whitespace never count as a change). Backup failures are logged
// and swallowed: by then the primary write has already landed.

use crate::error::Result;
use crate::store::config::StoreConfig;
use crate::store::models::{ProjectRecord, StoredProject};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Parse the data file into normalized records, in file order
pub(crate) fn read_projects(path: &Path) -> Result<Vec<ProjectRecord>> {
    let raw = fs::read(path)?;
    let stored: Vec<StoredProject> = serde_json::from_slice(&raw)?;

    Ok(stored
        .into_iter()
        .enumerate()
        .map(|(position, project)| project.normalize(position))
        .collect())
}

fn read_value(path: &Path) -> Result<Value> {
    let raw = fs::read(path)?;
    Ok(serde_json::from_slice(&raw)?)
}

/// Write the records and mirror to the backup if anything changed
///
/// Returns whether the content differed from what was on disk.
pub(crate) fn write_projects(config: &StoreConfig, projects: &[ProjectRecord]) -> Result<bool> {
    let new_value = serde_json::to_value(projects)?;

    // Unreadable or missing old content counts as a change
    let changed = match read_value(config.data_file()) {
        Ok(old_value) => old_value != new_value,
        Err(e) => {
            debug!(error = %e, "previous store content unreadable, treating save as a change");
            true
        }
    };

    let bytes = serde_json::to_vec_pretty(&new_value)?;
    write_atomic(config.data_file(), &bytes)?;

    if changed {
        mirror_backup(config);
    } else {
        debug!(path = ?config.data_file(), "store content unchanged, backup left alone");
    }

    Ok(changed)
}

/// Copy the primary file over the backup
///
/// Skipped when the primary is missing or empty. Never fails the caller.
pub(crate) fn mirror_backup(config: &StoreConfig) -> bool {
    let data_file = config.data_file();

    match fs::metadata(data_file) {
        Ok(meta) if meta.len() > 0 => {}
        _ => return false,
    }

    match fs::copy(data_file, config.backup_file()) {
        Ok(_) => {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            info!(backup = ?config.backup_file(), %timestamp, "project list backed up");
            true
        }
        Err(e) => {
            warn!(backup = ?config.backup_file(), error = %e, "failed to back up project list");
            false
        }
    }
}

// Temp file in the same directory, then rename over the target
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (StoreConfig, TempDir) {
        let temp = TempDir::new().unwrap();
        let config = StoreConfig::at(temp.path().join("projects.json"));
        (config, temp)
    }

    fn project(id: &str, order: usize) -> ProjectRecord {
        ProjectRecord {
            id: id.to_string(),
            name: format!("project-{}", id),
            path: "/tmp".to_string(),
            legacy_command: String::new(),
            commands: Vec::new(),
            result_path: String::new(),
            order,
            extra: Default::default(),
        }
    }

    #[test]
    fn test_first_write_is_a_change_and_backs_up() {
        let (config, _temp) = setup();

        let changed = write_projects(&config, &[project("a", 0)]).unwrap();
        assert!(changed);

        let primary = fs::read(config.data_file()).unwrap();
        let backup = fs::read(config.backup_file()).unwrap();
        assert_eq!(primary, backup);
    }

    #[test]
    fn test_unchanged_save_leaves_backup_alone() {
        let (config, _temp) = setup();
        write_projects(&config, &[project("a", 0)]).unwrap();

        // Sentinel: if the backup were rewritten this marker would vanish
        fs::write(config.backup_file(), "sentinel").unwrap();

        let changed = write_projects(&config, &[project("a", 0)]).unwrap();
        assert!(!changed);
        assert_eq!(fs::read_to_string(config.backup_file()).unwrap(), "sentinel");
    }

    #[test]
    fn test_changed_save_replaces_backup() {
        let (config, _temp) = setup();
        write_projects(&config, &[project("a", 0)]).unwrap();
        fs::write(config.backup_file(), "sentinel").unwrap();

        write_projects(&config, &[project("a", 0), project("b", 1)]).unwrap();

        let backup = read_value(config.backup_file()).unwrap();
        let primary = read_value(config.data_file()).unwrap();
        assert_eq!(backup, primary);
        assert_eq!(backup.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_formatting_differences_are_not_changes() {
        let (config, _temp) = setup();
        let records = vec![project("a", 0)];

        // Same content, different key order and no indentation
        fs::write(
            config.data_file(),
            r#"[{"order":0,"name":"project-a","id":"a","path":"/tmp","result_path":"","commands":[],"default_command":""}]"#,
        )
        .unwrap();
        fs::write(config.backup_file(), "sentinel").unwrap();

        let changed = write_projects(&config, &records).unwrap();
        assert!(!changed);
        assert_eq!(fs::read_to_string(config.backup_file()).unwrap(), "sentinel");
    }

    #[test]
    fn test_corrupt_previous_content_counts_as_change() {
        let (config, _temp) = setup();
        fs::write(config.data_file(), "{ not json").unwrap();

        let changed = write_projects(&config, &[]).unwrap();
        assert!(changed);
        assert_eq!(fs::read_to_string(config.backup_file()).unwrap(), "[]");
    }

    #[test]
    fn test_backup_failure_does_not_fail_write() {
        let temp = TempDir::new().unwrap();
        let config = StoreConfig::at(temp.path().join("projects.json"));

        // A directory where the backup file should go makes the copy fail
        fs::create_dir(config.backup_file()).unwrap();

        let changed = write_projects(&config, &[project("a", 0)]).unwrap();
        assert!(changed);
        assert_eq!(read_projects(config.data_file()).unwrap().len(), 1);
    }

    #[test]
    fn test_mirror_skips_empty_primary() {
        let (config, _temp) = setup();
        fs::write(config.data_file(), "").unwrap();

        assert!(!mirror_backup(&config));
        assert!(!config.backup_file().exists());
    }

    #[test]
    fn test_read_projects_backfills_in_file_order() {
        let (config, _temp) = setup();
        fs::write(
            config.data_file(),
            r#"[{"id":"x","name":"x","path":"/"},{"id":"y","name":"y","path":"/","order":0}]"#,
        )
        .unwrap();

        let projects = read_projects(config.data_file()).unwrap();
        assert_eq!(projects[0].order, 0);
        assert_eq!(projects[1].order, 0);
        assert_eq!(projects[0].id, "x");
    }
}
