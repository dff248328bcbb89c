//! # fileutils Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads the settings used by the `fileutils` command-line front
//! end: the default timestamp format, the CSV dialect used by `convert csv`,
//! and how often batch copies report progress. The library helpers never read
//! configuration themselves; callers pass the relevant values in.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. The file named by `FILEUTILS_CONFIG`, if set (used exclusively)
//! 2. Project-specific `.fileutils.toml` in the current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! ## Examples
//!
//! ```toml
//! [time]
//! format = "%Y%m%d-%H%M%S"
//!
//! [csv]
//! delimiter = "\t"
//! has_headers = true
//!
//! [copy]
//! progress_interval = 100
//! ```
//!
use crate::common::formats::tabular::CsvOptions;
use crate::common::time::{is_valid_format, DEFAULT_TIME_FORMAT};
use crate::core::error::{FileUtilsError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "FILEUTILS_CONFIG";
const PROJECT_CONFIG_FILENAME: &str = ".fileutils.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub time: TimeConfig,
    #[serde(default)]
    pub csv: CsvConfig,
    #[serde(default)]
    pub copy: CopyConfig,
}

/// Settings for the `time` command.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TimeConfig {
    /// strftime-style format used when `--format` is not given.
    #[serde(default = "default_time_format")]
    pub format: String,
}

/// CSV dialect used by `convert csv`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CsvConfig {
    /// Single ASCII character separating fields.
    #[serde(default = "default_csv_delimiter")]
    pub delimiter: String,
    /// Whether the first row holds column names.
    #[serde(default = "default_true")]
    pub has_headers: bool,
}

/// Settings for batch copies (`cp --batch`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CopyConfig {
    /// Log a progress line every N pairs.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            format: default_time_format(),
        }
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: default_csv_delimiter(),
            has_headers: true,
        }
    }
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            progress_interval: default_progress_interval(),
        }
    }
}

impl CsvConfig {
    /// Builds reader/writer options from this dialect.
    ///
    /// Assumes the config has been validated, so the delimiter is one ASCII byte.
    pub fn to_options(&self) -> CsvOptions {
        CsvOptions {
            delimiter: self.delimiter.as_bytes().first().copied().unwrap_or(b','),
            has_headers: self.has_headers,
            ..CsvOptions::default()
        }
    }
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}
fn default_csv_delimiter() -> String {
    ",".to_string()
}
fn default_true() -> bool {
    true
}
fn default_progress_interval() -> usize {
    crate::common::fs::copy::PROGRESS_INTERVAL
}

/// Loads, merges and validates configuration from all sources.
pub fn load_config() -> Result<Config> {
    let merged_config = match std::env::var_os(CONFIG_ENV_VAR) {
        Some(explicit) => {
            let path = PathBuf::from(explicit);
            info!("Loading configuration from {}: {}", CONFIG_ENV_VAR, path.display());
            load_config_from_path(&path)?
        }
        None => {
            let mut merged = toml::Table::new();
            if let Some(user_layer) = load_user_layer()? {
                merge_tables(&mut merged, user_layer);
            }
            if let Some(project_layer) = load_project_layer()? {
                merge_tables(&mut merged, project_layer);
            }
            config_from_table(merged)?
        }
    };
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_layer() -> Result<Option<toml::Table>> {
    let Some(proj_dirs) = ProjectDirs::from("com", "FileUtils", "fileutils") else {
        debug!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.exists() {
        info!("Loading user configuration from: {}", config_path.display());
        load_layer(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_project_layer() -> Result<Option<toml::Table>> {
    if let Some(project_config_path) = find_project_config_path()? {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_layer(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.fileutils.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path() -> Result<Option<PathBuf>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    Ok(find_project_config_from(&current_dir))
}

fn find_project_config_from(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

/// Reads one configuration file as a raw table, keeping only the keys it sets.
///
/// The file is also checked against [`Config`] on its own, so unknown keys and
/// wrong types are reported with the file that contains them.
fn load_layer(path: &Path) -> Result<toml::Table> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str::<Config>(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    config_from_table(load_layer(path)?)
}

fn config_from_table(table: toml::Table) -> Result<Config> {
    toml::Value::Table(table)
        .try_into()
        .context("Failed to build configuration from merged files")
}

/// Overlays `overlay` onto `base`: every key the overlay sets wins, and
/// sections present in both are merged key by key.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming)
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    let delimiter = &config.csv.delimiter;
    if delimiter.len() != 1 || !delimiter.is_ascii() {
        return Err(anyhow!(FileUtilsError::Config(format!(
            "CSV delimiter must be a single ASCII character, got {:?}.",
            delimiter
        ))));
    }
    if config.copy.progress_interval == 0 {
        return Err(anyhow!(FileUtilsError::Config(
            "copy.progress_interval must be at least 1.".to_string()
        )));
    }
    if !is_valid_format(&config.time.format) {
        return Err(anyhow!(FileUtilsError::Config(format!(
            "Invalid time format: {:?}.",
            config.time.format
        ))));
    }
    debug!("Configuration validation successful.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [time]
            format = "%Y%m%d"

            [csv]
            delimiter = ";"

            [copy]
            progress_interval = 25
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.time.format, "%Y%m%d");
        assert_eq!(config.csv.delimiter, ";");
        assert!(config.csv.has_headers); // Default
        assert_eq!(config.copy.progress_interval, 25);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[csv]\nquote = \"'\"\n");
        assert!(result.is_err());
    }

    fn layer(dir: &Path, name: &str, contents: &str) -> toml::Table {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        load_layer(&path).unwrap()
    }

    #[test]
    fn test_merge_prefers_project_values() -> Result<()> {
        let dir = tempdir()?;
        let mut merged = layer(
            dir.path(),
            "user.toml",
            "[time]\nformat = \"%H:%M\"\n[copy]\nprogress_interval = 50\n",
        );
        merge_tables(
            &mut merged,
            layer(dir.path(), "project.toml", "[csv]\ndelimiter = \"\\t\"\nhas_headers = false\n"),
        );

        let config = config_from_table(merged)?;

        assert_eq!(config.time.format, "%H:%M"); // From user, project left it unset
        assert_eq!(config.csv.delimiter, "\t");
        assert!(!config.csv.has_headers);
        assert_eq!(config.copy.progress_interval, 50);
        Ok(())
    }

    #[test]
    fn test_project_value_equal_to_default_still_overrides_user() -> Result<()> {
        let dir = tempdir()?;
        let mut merged = layer(
            dir.path(),
            "user.toml",
            "[csv]\nhas_headers = false\ndelimiter = \";\"\n[copy]\nprogress_interval = 3\n",
        );
        merge_tables(
            &mut merged,
            layer(
                dir.path(),
                "project.toml",
                "[csv]\nhas_headers = true\n[copy]\nprogress_interval = 10\n",
            ),
        );

        let config = config_from_table(merged)?;

        assert!(config.csv.has_headers);
        assert_eq!(config.csv.delimiter, ";");
        assert_eq!(config.copy.progress_interval, 10);
        Ok(())
    }

    #[test]
    fn test_layer_with_unknown_key_names_the_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[copy]\nspeed = 2\n")?;
        let err = load_layer(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("bad.toml"));
        Ok(())
    }

    #[test]
    fn test_validate_config_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_delimiter() {
        let config = Config {
            csv: CsvConfig {
                delimiter: "::".to_string(),
                has_headers: true,
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("single ASCII character"));
    }

    #[test]
    fn test_validate_config_zero_interval() {
        let config = Config {
            copy: CopyConfig {
                progress_interval: 0,
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_find_project_config_walks_up_to_git_root() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join(".git")).unwrap();
        let nested = root.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_config_from(&nested), None);

        fs::write(root.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(
            find_project_config_from(&nested),
            Some(root.path().join(PROJECT_CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_csv_config_to_options() {
        let options = CsvConfig {
            delimiter: "|".to_string(),
            has_headers: false,
        }
        .to_options();
        assert_eq!(options.delimiter, b'|');
        assert!(!options.has_headers);
    }
}
