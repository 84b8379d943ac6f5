use serde::{Deserialize, Serialize};

use mocky_core::SqlDialect;

use super::atomic::write_bytes_atomic;
use super::{WorkspacePaths, WorkspaceResult};

/// CLI defaults stored in `config/settings.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    /// Record count used when `--count` is omitted.
    pub default_count: u32,
    pub default_dialect: SqlDialect,
    /// SQL table name; the dataset type name is used when unset.
    pub default_table_name: Option<String>,
    pub interface_name: String,
    /// Filter for the JSON log file, in `EnvFilter` syntax.
    pub log_level: String,
    pub file_logging: bool,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            default_count: 10,
            default_dialect: SqlDialect::Mysql,
            default_table_name: None,
            interface_name: "GeneratedData".to_string(),
            log_level: "info".to_string(),
            file_logging: true,
        }
    }
}

pub fn load_or_create_settings(paths: &WorkspacePaths) -> WorkspaceResult<CliSettings> {
    let path = paths.settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        let settings: CliSettings = toml::from_str(&content)?;
        return Ok(settings);
    }

    let settings = CliSettings::default();
    save_settings(paths, &settings)?;
    Ok(settings)
}

pub fn save_settings(paths: &WorkspacePaths, settings: &CliSettings) -> WorkspaceResult<()> {
    let encoded = toml::to_string_pretty(settings)?;
    write_bytes_atomic(&paths.settings_path(), encoded.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_paths() -> WorkspacePaths {
        let root = std::env::temp_dir().join(format!("mocky_settings_{}", uuid::Uuid::new_v4()));
        WorkspacePaths::new(root)
    }

    #[test]
    fn creates_defaults_then_reads_them_back() {
        let paths = temp_paths();
        let created = load_or_create_settings(&paths).expect("create settings");
        assert_eq!(created, CliSettings::default());
        assert!(paths.settings_path().exists());

        let loaded = load_or_create_settings(&paths).expect("load settings");
        assert_eq!(loaded, created);
        std::fs::remove_dir_all(&paths.root).ok();
    }

    #[test]
    fn partial_files_fall_back_to_defaults() {
        let paths = temp_paths();
        std::fs::create_dir_all(&paths.config_dir).expect("config dir");
        std::fs::write(
            paths.settings_path(),
            "default_count = 50\ndefault_dialect = \"postgresql\"\n",
        )
        .expect("write settings");

        let settings = load_or_create_settings(&paths).expect("load settings");
        assert_eq!(settings.default_count, 50);
        assert_eq!(settings.default_dialect, SqlDialect::Postgresql);
        assert_eq!(settings.interface_name, "GeneratedData");
        assert!(settings.file_logging);
        std::fs::remove_dir_all(&paths.root).ok();
    }
}
