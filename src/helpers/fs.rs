//! File System Utilities
//!
//! Configuration directory resolution and data file loading.

use crate::domain::Row;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "cyenx", "enterprise-grid").ok_or_else(|| Error::Invalid {
        message: "Could not determine project directories".to_string(),
    })
}

/// Get or create the application's configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/enterprise-grid/` or `$XDG_CONFIG_HOME/enterprise-grid/`
/// - **macOS**: `~/Library/Application Support/com.cyenx.enterprise-grid/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\cyenx\enterprise-grid\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let project_dirs = project_dirs()?;
    let config_dir = project_dirs.config_dir();

    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    Ok(config_dir.to_path_buf())
}

/// Load a JSON array of row objects
pub fn load_rows(path: &Path) -> Result<Vec<Row>> {
    let content = fs::read_to_string(path)?;
    let rows: Vec<Row> = serde_json::from_str(&content)?;
    info!(path = ?path, rows = rows.len(), "Loaded rows");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rows_from_file() {
        let path = std::env::temp_dir().join(format!("grid-rows-{}.json", std::process::id()));
        fs::write(&path, r#"[{"id": 1, "name": "Jane"}, {"id": 2}]"#).expect("write");

        let rows = load_rows(&path).expect("load");
        let _ = fs::remove_file(&path);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name").to_text(), "Jane");
        assert!(rows[1].get("name").is_null());
    }

    #[test]
    fn test_load_rows_missing_file() {
        let result = load_rows(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
