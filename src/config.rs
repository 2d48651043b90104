use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{list_name_from_key, ListName};

const DEFAULT_ENV_PREFIX: &str = "VIDSTASH";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default)]
    pub key: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            user_agent: default_user_agent(),
            timeout: default_timeout(),
        }
    }
}

fn default_user_agent() -> String {
    format!("vidstash/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout() -> Duration {
    Duration::from_secs(20)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub start_tab: Option<ListName>,
}

impl UiConfig {
    pub fn start_tab(&self) -> ListName {
        self.start_tab.unwrap_or_default()
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            start_tab: None,
        }
    }
}

fn default_theme() -> String {
    "default".into()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub config_file: Option<PathBuf>,
    pub env_prefix: Option<String>,
}

pub fn load(options: LoadOptions) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(path) = options.config_file.as_ref() {
        if path.exists() {
            let from_file = read_config_file(path)?;
            cfg = merge_config(cfg, from_file);
        }
    } else if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            let from_file = read_config_file(&default_path)?;
            cfg = merge_config(cfg, from_file);
        }
    }

    let prefix = options.env_prefix.as_deref().unwrap_or(DEFAULT_ENV_PREFIX);
    cfg = merge_config(cfg, load_env(prefix));

    Ok(cfg)
}

fn read_config_file(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&data)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
    Ok(config)
}

fn merge_config(mut base: Config, other: Config) -> Config {
    if !other.api.key.is_empty() {
        base.api.key = other.api.key;
    }
    if !other.api.user_agent.is_empty() {
        base.api.user_agent = other.api.user_agent;
    }
    if other.api.timeout != default_timeout() {
        base.api.timeout = other.api.timeout;
    }

    if !other.ui.theme.is_empty() {
        base.ui.theme = other.ui.theme;
    }
    if other.ui.start_tab.is_some() {
        base.ui.start_tab = other.ui.start_tab;
    }

    if other.storage.path.is_some() {
        base.storage.path = other.storage.path;
    }

    base
}

fn load_env(prefix: &str) -> Config {
    let mut map: HashMap<String, String> = HashMap::new();
    let upper_prefix = format!("{}_", prefix.to_uppercase());

    for (key, value) in env::vars() {
        if let Some(stripped) = key.strip_prefix(&upper_prefix) {
            let normalized = stripped.to_ascii_lowercase().replace("__", ".");
            map.insert(normalized, value);
        }
    }

    let mut cfg = Config::default();
    for (key, value) in map {
        apply_env_value(&mut cfg, &key, value);
    }
    cfg
}

fn apply_env_value(cfg: &mut Config, key: &str, value: String) {
    match key {
        "api.key" => cfg.api.key = value,
        "api.user_agent" => cfg.api.user_agent = value,
        "api.timeout" => {
            if let Ok(duration) = humantime::parse_duration(&value) {
                cfg.api.timeout = duration;
            }
        }
        "ui.theme" => cfg.ui.theme = value,
        "ui.start_tab" => cfg.ui.start_tab = Some(list_name_from_key(&value)),
        "storage.path" => cfg.storage.path = Some(PathBuf::from(value)),
        _ => {}
    }
}

pub fn default_path() -> Option<PathBuf> {
    default_config_path()
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vidstash").join("config.yaml"))
}

/// First-run helper: persists the API key without disturbing the rest of
/// an existing config file.
pub fn save_api_key(path: Option<PathBuf>, key: &str) -> Result<PathBuf> {
    let key = key.trim();
    anyhow::ensure!(!key.is_empty(), "config: api.key is required");

    let path = if let Some(path) = path {
        path
    } else {
        default_config_path().context("config: unable to determine default config path")?
    };

    let mut cfg = if path.exists() {
        read_config_file(&path)?
    } else {
        Config::default()
    };
    cfg.api.key = key.to_string();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("config: failed to create directory {}", parent.display()))?;
    }

    let contents = serde_yaml::to_string(&cfg).context("config: failed to serialize config")?;
    fs::write(&path, contents)
        .with_context(|| format!("config: failed to write file {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::tempdir;

    #[test]
    fn load_defaults_without_files() {
        let cfg = load(LoadOptions {
            env_prefix: Some("VIDSTASH_TEST_NONE".into()),
            ..LoadOptions::default()
        })
        .unwrap();
        assert_eq!(cfg.ui.theme, "default");
        assert_eq!(cfg.ui.start_tab(), ListName::Unwatched);
        assert_eq!(cfg.api.timeout, Duration::from_secs(20));
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "api:\n  key: abc123\nui:\n  start_tab: watched\n",
        )
        .unwrap();
        let cfg = load(LoadOptions {
            config_file: Some(path),
            env_prefix: Some("VIDSTASH_TEST_NONE".into()),
        })
        .unwrap();
        assert_eq!(cfg.api.key, "abc123");
        assert_eq!(cfg.ui.start_tab(), ListName::Watched);
        assert_eq!(cfg.api.user_agent, default_user_agent());
    }

    #[test]
    fn env_overrides() {
        env::set_var("VIDSTASH_TEST_ENV_UI__THEME", "midnight");
        env::set_var("VIDSTASH_TEST_ENV_API__TIMEOUT", "5s");
        let cfg = load(LoadOptions {
            env_prefix: Some("VIDSTASH_TEST_ENV".into()),
            ..LoadOptions::default()
        })
        .unwrap();
        assert_eq!(cfg.ui.theme, "midnight");
        assert_eq!(cfg.api.timeout, Duration::from_secs(5));
        env::remove_var("VIDSTASH_TEST_ENV_UI__THEME");
        env::remove_var("VIDSTASH_TEST_ENV_API__TIMEOUT");
    }

    #[test]
    fn save_api_key_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        save_api_key(Some(path.clone()), "secret").unwrap();
        let saved = read_config_file(&path).unwrap();
        assert_eq!(saved.api.key, "secret");
    }
}
