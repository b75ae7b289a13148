//! Configuration management module
//!
//! Layers, lowest to highest: built-in defaults, YAML file, `TB_EXPIRY__*`
//! environment overlays. CLI flags are applied by the commands themselves.

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tb_expiry_record_store::ColumnResolverConfig;

use crate::errors::ConfigError;

const ENV_PREFIX: &str = "TB_EXPIRY__";
const LOCAL_CONFIG_PATH: &str = "config/config.yaml";
const APP_DIR: &str = "tb-expiry";

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|err| ConfigError::Invalid(format!("server address: {}", err)))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// CSV file with one row per region
    pub path: PathBuf,
    /// Substring looked for in headers to find the region column
    pub region_field_hint: String,
    /// Full resolver rules; when set, `region_field_hint` is ignored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<ColumnResolverConfig>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("tb_notifications.csv"),
            region_field_hint: "state".to_string(),
            columns: None,
        }
    }
}

impl SourceConfig {
    pub fn resolver(&self) -> ColumnResolverConfig {
        match &self.columns {
            Some(columns) => columns.clone(),
            None => ColumnResolverConfig::with_region_hint(self.region_field_hint.clone()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Effective configuration plus where the file layer came from
#[derive(Clone, Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub path: PathBuf,
    pub file_found: bool,
    pub env_overrides: Vec<String>,
}

/// Pick the config file: explicit path, then `config/config.yaml`, then the user config dir.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let local = PathBuf::from(LOCAL_CONFIG_PATH);
    if local.exists() {
        return local;
    }
    match dirs::config_dir() {
        Some(mut dir) => {
            dir.push(APP_DIR);
            dir.push("config.yaml");
            dir
        }
        None => local,
    }
}

pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let path = resolve_config_path(explicit);
    let vars: Vec<(String, String)> = env::vars().collect();
    load_config_with_env(&path, &vars)
}

/// Load from `path` using the given environment instead of the process one.
pub fn load_config_with_env(
    path: &Path,
    vars: &[(String, String)],
) -> Result<LoadedConfig, ConfigError> {
    let mut merged = serde_json::to_value(AppConfig::default())
        .map_err(|err| ConfigError::Invalid(err.to_string()))?;

    let file_found = path.exists();
    if file_found {
        let content = fs::read_to_string(path)
            .map_err(|err| ConfigError::Io(format!("{}: {}", path.display(), err)))?;
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(&content)
            .map_err(|err| ConfigError::Invalid(format!("{}: {}", path.display(), err)))?;
        let file_value = serde_json::to_value(yaml_value)
            .map_err(|err| ConfigError::Invalid(format!("{}: {}", path.display(), err)))?;
        if !file_value.is_null() {
            merge_value(&mut merged, file_value);
        }
    }

    let mut env_overrides = Vec::new();
    for (key, raw) in vars {
        let Some(stripped) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let segments = stripped
            .split("__")
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.to_ascii_lowercase())
            .collect::<Vec<_>>();
        if segments.is_empty() {
            continue;
        }
        set_path(&mut merged, &segments, parse_env_value(raw));
        // "2024" or "true" may be meant for a string field
        if serde_json::from_value::<AppConfig>(merged.clone()).is_err() {
            set_path(&mut merged, &segments, Value::String(raw.clone()));
        }
        env_overrides.push(segments.join("."));
    }

    let config: AppConfig =
        serde_json::from_value(merged).map_err(|err| ConfigError::Invalid(err.to_string()))?;

    Ok(LoadedConfig {
        config,
        path: path.to_path_buf(),
        file_found,
        env_overrides,
    })
}

fn merge_value(base: &mut Value, overlay: Value) {
    match overlay {
        Value::Object(overlay_map) if base.is_object() => {
            let Value::Object(base_map) = base else {
                return;
            };
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        other => *base = other,
    }
}

fn set_path(root: &mut Value, segments: &[String], value: Value) {
    let mut cursor = root;
    for segment in &segments[..segments.len() - 1] {
        if !cursor.is_object() {
            *cursor = Value::Object(Map::new());
        }
        cursor = match cursor {
            Value::Object(map) => map
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new())),
            _ => return,
        };
    }
    if !cursor.is_object() {
        *cursor = Value::Object(Map::new());
    }
    if let (Value::Object(map), Some(last)) = (cursor, segments.last()) {
        map.insert(last.clone(), value);
    }
}

fn parse_env_value(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if let Ok(boolean) = raw.parse::<bool>() {
        return Value::Bool(boolean);
    }
    if let Ok(int_val) = raw.parse::<i64>() {
        return Value::Number(int_val.into());
    }
    if let Ok(parsed @ (Value::Object(_) | Value::Array(_))) = serde_json::from_str::<Value>(raw)
    {
        return parsed;
    }
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_with_env(&dir.path().join("none.yaml"), &[]).unwrap();
        assert!(!loaded.file_found);
        assert_eq!(loaded.config, AppConfig::default());
        assert_eq!(loaded.config.server.port, 8000);
        assert_eq!(
            loaded.config.source.path,
            PathBuf::from("tb_notifications.csv")
        );
    }

    #[test]
    fn file_overrides_defaults_partially() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"server:
  port: 9100
source:
  path: data/notifications.csv
"#,
        )
        .unwrap();

        let loaded = load_config_with_env(&path, &[]).unwrap();
        assert!(loaded.file_found);
        assert_eq!(loaded.config.server.port, 9100);
        assert_eq!(loaded.config.server.host, "127.0.0.1");
        assert_eq!(
            loaded.config.source.path,
            PathBuf::from("data/notifications.csv")
        );
        assert_eq!(loaded.config.source.region_field_hint, "state");
    }

    #[test]
    fn env_overlay_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "server:\n  port: 9100\n").unwrap();

        let loaded = load_config_with_env(
            &path,
            &env(&[
                ("TB_EXPIRY__SERVER__PORT", "9200"),
                ("TB_EXPIRY__LOGGING__LEVEL", "debug"),
                ("UNRELATED", "1"),
            ]),
        )
        .unwrap();
        assert_eq!(loaded.config.server.port, 9200);
        assert_eq!(loaded.config.logging.level, "debug");
        assert_eq!(loaded.env_overrides.len(), 2);
    }

    #[test]
    fn env_overlay_keeps_strings_for_string_fields() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_with_env(
            &dir.path().join("none.yaml"),
            &env(&[
                ("TB_EXPIRY__SOURCE__PATH", "2024"),
                ("TB_EXPIRY__SOURCE__REGION_FIELD_HINT", "true"),
                ("TB_EXPIRY__SERVER__PORT", "9300"),
            ]),
        )
        .unwrap();
        assert_eq!(loaded.config.source.path, PathBuf::from("2024"));
        assert_eq!(loaded.config.source.region_field_hint, "true");
        assert_eq!(loaded.config.server.port, 9300);
    }

    #[test]
    fn env_overlay_with_bad_type_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_with_env(
            &dir.path().join("none.yaml"),
            &env(&[("TB_EXPIRY__SERVER__PORT", "eighty")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn invalid_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "server:\n  port: not-a-port\n").unwrap();
        let err = load_config_with_env(&path, &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn region_hint_feeds_resolver_unless_columns_given() {
        let mut source = SourceConfig {
            region_field_hint: "district".into(),
            ..SourceConfig::default()
        };
        assert_eq!(
            source.resolver(),
            ColumnResolverConfig::with_region_hint("district")
        );

        source.columns = Some(ColumnResolverConfig::default());
        assert_eq!(source.resolver(), ColumnResolverConfig::default());
    }

    #[test]
    fn socket_addr_parses() {
        let server = ServerConfig {
            host: "0.0.0.0".into(),
            port: 8080,
        };
        assert_eq!(server.socket_addr().unwrap().port(), 8080);
        let bad = ServerConfig {
            host: "not a host".into(),
            port: 1,
        };
        assert!(bad.socket_addr().is_err());
    }
}
