//! Config file handling

use std::path::{Path, PathBuf};

use crate::errors::ReqstashError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "REQSTASH_CONFIG_DIR";

/// Default store file name, relative to the config directory
const DEFAULT_STORE_FILE: &str = "requests.json";

/// How imported requests are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Canonical JSON (default)
    #[default]
    Json,
    /// Equivalent curl command lines
    Curl,
}

impl OutputFormat {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "curl" => Some(OutputFormat::Curl),
            _ => None,
        }
    }
}

/// reqstash configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
    pub store_path: PathBuf,
    pub output_format: OutputFormat,
    pub compact: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_dir(Self::default_config_dir())
    }
}

impl Config {
    fn with_dir(config_dir: PathBuf) -> Self {
        Self {
            store_path: config_dir.join(DEFAULT_STORE_FILE),
            config_dir,
            output_format: OutputFormat::default(),
            compact: false,
        }
    }

    /// Load configuration from the config file (TOML format)
    pub fn load() -> Result<Self, ReqstashError> {
        Self::load_from(Self::default_config_dir())
    }

    /// Load configuration from `config.toml` inside `config_dir`
    pub fn load_from(config_dir: PathBuf) -> Result<Self, ReqstashError> {
        let config_file = config_dir.join("config.toml");

        if !config_file.exists() {
            return Ok(Self::with_dir(config_dir));
        }

        let content = std::fs::read_to_string(&config_file)
            .map_err(|e| ReqstashError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_toml(&content, config_dir)
    }

    fn from_toml(content: &str, config_dir: PathBuf) -> Result<Self, ReqstashError> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| ReqstashError::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::with_dir(config_dir);

        if let Some(path) = toml_value
            .get("store")
            .and_then(|s| s.get("path"))
            .and_then(|v| v.as_str())
        {
            config.store_path = Self::resolve(&config.config_dir, path);
        }

        if let Some(name) = toml_value
            .get("output")
            .and_then(|o| o.get("format"))
            .and_then(|v| v.as_str())
        {
            config.output_format = OutputFormat::from_name(name).ok_or_else(|| {
                ReqstashError::Config(format!("Unknown output format: {}", name))
            })?;
        }

        config.compact = toml_value
            .get("output")
            .and_then(|o| o.get("compact"))
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        Ok(config)
    }

    /// Resolve relative paths against the config dir
    fn resolve(config_dir: &Path, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            path
        } else {
            config_dir.join(path)
        }
    }

    /// Get the default config directory
    fn default_config_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .map(|p| p.join("reqstash"))
            .unwrap_or_else(|| PathBuf::from(".reqstash"))
    }
}
