//! Configuration lookup and loading
//!
//! The configuration is searched in two places: `config.yml` in the working
//! directory, then an explicitly supplied path (`--config-file` or
//! `HBACKUP_CONFIG_FILE`). Files ending in `.toml` are parsed as TOML,
//! everything else as YAML.

use super::schema::BackupConfig;
use crate::domain::errors::BackupError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Configuration file looked up in the working directory first
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// Finds the configuration file to load
///
/// # Errors
///
/// Returns [`BackupError::ConfigMissing`] if neither location holds a file.
pub fn locate_config(explicit: Option<&Path>) -> Result<PathBuf> {
    locate_config_in(Path::new("."), explicit)
}

/// Same as [`locate_config`] with the default file resolved against `base_dir`
pub fn locate_config_in(base_dir: &Path, explicit: Option<&Path>) -> Result<PathBuf> {
    let default = base_dir.join(DEFAULT_CONFIG_FILE);
    if default.is_file() {
        tracing::info!(path = %default.display(), "Using default config file");
        return Ok(default);
    }

    tracing::warn!(
        path = %default.display(),
        "Default config file not found, falling back to explicit config file"
    );

    match explicit {
        Some(path) if path.is_file() => {
            tracing::info!(path = %path.display(), "Using explicit config file");
            Ok(path.to_path_buf())
        }
        Some(path) => Err(BackupError::ConfigMissing(format!(
            "neither {} nor {} exists",
            default.display(),
            path.display()
        ))),
        None => Err(BackupError::ConfigMissing(format!(
            "{} does not exist and no --config-file was given",
            default.display()
        ))),
    }
}

/// Loads configuration from a YAML or TOML file
///
/// This function:
/// 1. Reads the file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the document into BackupConfig
/// 4. Applies environment variable overrides (HBACKUP_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`BackupError::ConfigMissing`] if the file does not exist and
/// [`BackupError::Configuration`] for every other failure.
///
/// # Examples
///
/// ```no_run
/// use hbackup::config::loader::load_config;
///
/// let config = load_config("config.yml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<BackupConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(BackupError::ConfigMissing(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        BackupError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config = parse_config(path, &contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        BackupError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn parse_config(path: &Path, contents: &str) -> Result<BackupConfig> {
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        Ok(toml::from_str(contents)?)
    } else {
        Ok(serde_yaml::from_str(contents)?)
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(BackupError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        BackupError::Configuration(format!("Invalid value '{value}' for {name}"))
    })
}

/// Applies environment variable overrides using HBACKUP_* prefix
///
/// Environment variables follow the pattern: HBACKUP_<SECTION>_<KEY>
/// For example: HBACKUP_CONNECTION_HOST, HBACKUP_EXPORT_BATCH_SIZE
fn apply_env_overrides(config: &mut BackupConfig) -> Result<()> {
    // Connection overrides
    if let Ok(val) = std::env::var("HBACKUP_CONNECTION_HOST") {
        config.connection.host = val;
    }
    if let Ok(val) = std::env::var("HBACKUP_CONNECTION_PORT") {
        config.connection.port = parse_override("HBACKUP_CONNECTION_PORT", &val)?;
    }
    if let Ok(val) = std::env::var("HBACKUP_CONNECTION_SCHEME") {
        config.connection.scheme = val;
    }
    if let Ok(val) = std::env::var("HBACKUP_CONNECTION_TABLE_NAME") {
        config.connection.table_name = val;
    }
    if let Ok(val) = std::env::var("HBACKUP_CONNECTION_COLUMN_FAMILY") {
        config.connection.column_family = val;
    }
    if let Ok(val) = std::env::var("HBACKUP_CONNECTION_START_TS") {
        config.connection.start_ts = parse_override("HBACKUP_CONNECTION_START_TS", &val)?;
    }
    if let Ok(val) = std::env::var("HBACKUP_CONNECTION_END_TS") {
        config.connection.end_ts = parse_override("HBACKUP_CONNECTION_END_TS", &val)?;
    }

    // Export overrides
    if let Ok(val) = std::env::var("HBACKUP_EXPORT_BATCH_SIZE") {
        config.export.batch_size = parse_override("HBACKUP_EXPORT_BATCH_SIZE", &val)?;
    }
    if let Ok(val) = std::env::var("HBACKUP_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("HBACKUP_LOGGING_LOG_LEVEL") {
        config.logging.log_level = val;
    }
    if let Ok(val) = std::env::var("HBACKUP_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("HBACKUP_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const YAML: &str = r#"
# sample
connection-settings:
  host: localhost
  port: 8080
  backup-table-name: events
  start-ts: 0
  end-ts: 100
column_type_map:
  id: string
column_desc_map:
  id: ID
"#;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("HBACKUP_UNIT_TEST_VAR", "test_value");
        let input = "host: \"${HBACKUP_UNIT_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "host: \"test_value\"\n");
        std::env::remove_var("HBACKUP_UNIT_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("HBACKUP_UNIT_MISSING_VAR");
        let input = "host: \"${HBACKUP_UNIT_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("HBACKUP_UNIT_COMMENTED_VAR");
        let input = "# host: ${HBACKUP_UNIT_COMMENTED_VAR}";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.yml");
        assert!(matches!(result, Err(BackupError::ConfigMissing(_))));
    }

    #[test]
    fn test_load_config_yaml() {
        let mut temp_file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        temp_file.write_all(YAML.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.connection.table_name, "events");
        assert_eq!(config.header_labels(), ["ID"]);
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let mut temp_file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        temp_file.write_all(b"connection-settings: [").unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(matches!(result, Err(BackupError::Configuration(_))));
    }

    #[test]
    fn test_locate_prefers_default_file() {
        let dir = TempDir::new().unwrap();
        let default = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&default, YAML).unwrap();

        let explicit = NamedTempFile::new().unwrap();
        let found = locate_config_in(dir.path(), Some(explicit.path())).unwrap();
        assert_eq!(found, default);
    }

    #[test]
    fn test_locate_falls_back_to_explicit_file() {
        let dir = TempDir::new().unwrap();
        let explicit = NamedTempFile::new().unwrap();

        let found = locate_config_in(dir.path(), Some(explicit.path())).unwrap();
        assert_eq!(found, explicit.path());
    }

    #[test]
    fn test_locate_missing_everywhere() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("elsewhere.yml");

        let result = locate_config_in(dir.path(), Some(&missing));
        assert!(matches!(result, Err(BackupError::ConfigMissing(_))));

        let result = locate_config_in(dir.path(), None);
        assert!(matches!(result, Err(BackupError::ConfigMissing(_))));
    }
}
