/// Bulk export and import
///
/// Export is the sorted project list in a small versioned envelope. Import
/// feeds each incoming record through `add`, skipping the ones that fail
/// validation instead of aborting.

use crate::error::{LaunchpadError, Result};
use crate::store::models::{commands_from_legacy, ImportSummary, ProjectExport};
use crate::store::ProjectStore;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

/// Version tag written into export files
pub const EXPORT_VERSION: &str = "1.0";

impl ProjectStore {
    /// Snapshot of every project, sorted by order
    pub fn export(&self) -> ProjectExport {
        ProjectExport {
            version: EXPORT_VERSION.to_string(),
            exported_at: Utc::now().to_rfc3339(),
            projects: self.get_all(),
        }
    }

    /// Import projects from an export envelope or a bare project array
    ///
    /// # Returns
    /// * `Ok(ImportSummary)` - How many records were added and skipped
    /// * `Err(InvalidImport)` - The document has no project list
    pub fn import(&self, data: &Value) -> Result<ImportSummary> {
        let incoming = match data {
            Value::Array(items) => items,
            Value::Object(map) => match map.get("projects") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(LaunchpadError::InvalidImport(
                        "missing projects".to_string(),
                    ))
                }
            },
            _ => {
                return Err(LaunchpadError::InvalidImport(
                    "expected an object or an array".to_string(),
                ))
            }
        };

        let mut summary = ImportSummary::default();

        for item in incoming {
            let name = item.get("name").and_then(Value::as_str).unwrap_or("");
            let path = item.get("path").and_then(Value::as_str).unwrap_or("");
            if name.is_empty() || path.is_empty() {
                summary.skipped += 1;
                continue;
            }

            let legacy = item
                .get("default_command")
                .and_then(Value::as_str)
                .unwrap_or("");
            let result_path = item
                .get("result_path")
                .and_then(Value::as_str)
                .unwrap_or("");
            let commands = match item.get("commands").and_then(Value::as_array) {
                Some(list) => list
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect(),
                None => commands_from_legacy(legacy),
            };

            match self.add(name, path, legacy, result_path, Some(commands)) {
                Ok(_) => summary.imported += 1,
                Err(e @ (LaunchpadError::DuplicateName(_) | LaunchpadError::InvalidPath(_))) => {
                    debug!(name = %name, error = %e, "skipping imported project");
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            imported = summary.imported,
            skipped = summary.skipped,
            "import finished"
        );
        Ok(summary)
    }
}
