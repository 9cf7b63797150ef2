use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LogbookError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub http_addr: String,
    pub db_threads: u32,
}

impl Default for Config {
    fn default() -> Self {
        let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let data_root = env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(home).join(".local/share"));

        Self {
            db_path: data_root.join("logbook/logbook.duckdb"),
            http_addr: "127.0.0.1:8080".to_string(),
            db_threads: 4,
        }
    }
}

impl Config {
    /// Defaults, then the config file (if present), then the environment.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(file_overrides) = load_file_overrides(&config_file_path())? {
            apply_overrides(&mut cfg, file_overrides);
        }
        apply_overrides(&mut cfg, load_env_overrides()?);
        Ok(cfg)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigOverrides {
    db_path: Option<PathBuf>,
    http_addr: Option<String>,
    db_threads: Option<u32>,
}

fn config_file_path() -> PathBuf {
    if let Ok(path) = env::var("LOGBOOK_CONFIG") {
        return PathBuf::from(path);
    }

    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let config_home = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(home).join(".config"));
    config_home.join("logbook/config.toml")
}

fn load_file_overrides(path: &Path) -> Result<Option<ConfigOverrides>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| LogbookError::Config(format!("failed reading {}: {e}", path.display())))?;
    parse_file_overrides(&raw)
        .map(Some)
        .map_err(|e| LogbookError::Config(format!("failed parsing {}: {e}", path.display())))
}

fn parse_file_overrides(raw: &str) -> std::result::Result<ConfigOverrides, toml::de::Error> {
    toml::from_str(raw)
}

fn load_env_overrides() -> Result<ConfigOverrides> {
    let db_threads = match env::var("LOGBOOK_DB_THREADS") {
        Ok(v) => Some(v.parse::<u32>().map_err(|e| {
            LogbookError::Config(format!("bad LOGBOOK_DB_THREADS in environment: {e}"))
        })?),
        Err(_) => None,
    };

    Ok(ConfigOverrides {
        db_path: env::var("LOGBOOK_DB_PATH").ok().map(PathBuf::from),
        http_addr: env::var("LOGBOOK_HTTP_ADDR").ok(),
        db_threads,
    })
}

fn apply_overrides(cfg: &mut Config, overrides: ConfigOverrides) {
    if let Some(v) = overrides.db_path {
        cfg.db_path = v;
    }
    if let Some(v) = overrides.http_addr {
        cfg.http_addr = v;
    }
    if let Some(v) = overrides.db_threads {
        cfg.db_threads = v.max(1);
    }
}
